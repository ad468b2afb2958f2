//! Integration tests for Kairo
//!
//! End-to-end tests that verify the open-edit-save-run cycle works together.
//!
mod common;
use common::*;
use kairo::error::{BackendError, StoreError, WorkbenchError};
use kairo::prelude::*;
use serde_json::json;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// A store whose writes always fail, for exercising save error paths.
    struct FailingStore {
        inner: MemoryDocumentStore,
    }

    impl DocumentStore for FailingStore {
        fn list(&self) -> Result<Vec<DocumentSummary>, StoreError> {
            self.inner.list()
        }

        fn get(&self, id: &str) -> Result<WorkflowDocument, StoreError> {
            self.inner.get(id)
        }

        fn create(&mut self, template: WorkflowDocument) -> Result<DocumentRecord, StoreError> {
            self.inner.create(template)
        }

        fn put(
            &mut self,
            _id: &str,
            _document: &WorkflowDocument,
        ) -> Result<WorkflowDocument, StoreError> {
            Err(StoreError::Internal("disk full".to_string()))
        }
    }

    /// A schema provider that is unreachable at startup.
    struct OfflineSchemaProvider;

    impl SchemaProvider for OfflineSchemaProvider {
        fn node_schemas(&self) -> Result<JsonMap, BackendError> {
            Err(BackendError::Failed("schema registry offline".to_string()))
        }
    }

    #[test]
    fn test_open_edit_save_cycle() {
        let (mut bench, id) = seeded_workbench(two_node_document());
        bench.open(&id).expect("Open should succeed");

        let session = bench.session().expect("Session should exist");
        assert_eq!(session.graph().nodes.len(), 2);
        assert_eq!(
            session.graph().nodes[0].position,
            Position { x: 100.0, y: 100.0 }
        );
        assert_eq!(
            session.graph().nodes[1].position,
            Position { x: 250.0, y: 150.0 }
        );
        assert_eq!(session.graph().edges.len(), 1);
        assert_eq!(session.graph().edges[0].label, None);

        bench
            .session_mut()
            .expect("Session should exist")
            .move_node("start", Position { x: 50.0, y: 50.0 });
        bench.save().expect("Save should succeed");

        let document = bench.document().expect("Baseline should exist");
        let start = document.find_node("start").expect("Start node should exist");
        assert_eq!(start.position(), Some(Position { x: 50.0, y: 50.0 }));
        assert_eq!(document.edges.len(), 1);
        assert_eq!(document.edges[0].source, "start");
        assert_eq!(document.edges[0].target, "end");
        assert_eq!(document.edges[0].condition, None);
        assert!(document.edges[0].extra.is_empty());

        // Reopening pulls the stored copy, proving the write went through.
        bench.open(&id).expect("Reopen should succeed");
        let stored = bench.document().expect("Baseline should exist");
        let start = stored.find_node("start").expect("Start node should exist");
        assert_eq!(start.position(), Some(Position { x: 50.0, y: 50.0 }));

        println!("Round-tripped workflow '{}' through the store", id);
    }

    #[test]
    fn test_full_editing_workflow() {
        let (mut bench, id) = seeded_workbench(two_node_document());
        bench.open(&id).expect("Open should succeed");

        let session = bench.session_mut().expect("Session should exist");
        session.open_menu(ScreenPoint { x: 300.0, y: 200.0 });
        let llm_id = session
            .add_node_from_menu("LLM")
            .expect("Menu add should succeed");
        session.connect("start", &llm_id);

        assert!(bench.select(&llm_id));
        let form = bench
            .session_mut()
            .expect("Session should exist")
            .form_mut()
            .expect("Form should be open");
        form.set_param("system_prompt", json!("Be brief."));
        form.inputs_text = r#"{ "prompt": "start.output" }"#.to_string();
        let applied = bench
            .session_mut()
            .expect("Session should exist")
            .confirm_editor()
            .expect("Confirm should succeed");
        assert!(applied);

        bench.save().expect("Save should succeed");
        bench.open(&id).expect("Reopen should succeed");

        let document = bench.document().expect("Baseline should exist");
        assert_eq!(document.nodes.len(), 3);
        let llm = document.find_node(&llm_id).expect("Added node should persist");
        assert_eq!(llm.node_type, "LLM");
        assert_eq!(llm.position(), Some(Position { x: 300.0, y: 200.0 }));
        let params = llm.params.as_ref().expect("Params should persist");
        assert_eq!(params.get("system_prompt"), Some(&json!("Be brief.")));
        assert_eq!(params.get("provider"), Some(&json!("openai")));
        let inputs = llm.inputs.as_ref().expect("Inputs should persist");
        assert_eq!(inputs.get("prompt"), Some(&json!("start.output")));

        assert_eq!(document.edges.len(), 2);
        assert_eq!(document.edges[1].source, "start");
        assert_eq!(document.edges[1].target, llm_id);

        println!("Persisted workflow with {} nodes", document.nodes.len());
    }

    #[test]
    fn test_run_commits_edits_first() {
        let (mut bench, id) = seeded_workbench(two_node_document());
        bench.open(&id).expect("Open should succeed");
        bench
            .session_mut()
            .expect("Session should exist")
            .move_node("start", Position { x: 50.0, y: 50.0 });

        let mut inputs = JsonMap::new();
        inputs.insert("topic".to_string(), json!("cats"));
        let result = bench.run(&inputs).expect("Run should succeed");

        assert_eq!(result["workflow"].as_str(), Some(id.as_str()));
        assert_eq!(result["inputs"]["topic"], json!("cats"));
        assert_eq!(result["result"]["status"], json!("completed"));
        assert!(!bench.is_busy());

        // The backend ran against the freshly stored copy.
        bench.open(&id).expect("Reopen should succeed");
        let start = bench
            .document()
            .expect("Baseline should exist")
            .find_node("start")
            .expect("Start node should exist")
            .position();
        assert_eq!(start, Some(Position { x: 50.0, y: 50.0 }));
    }

    #[test]
    fn test_unsupported_run_surfaces_backend_message() {
        let mut store = MemoryDocumentStore::new();
        let id = store.seed(two_node_document());
        let mut bench = Workbench::new(
            Box::new(store),
            Box::new(MockExecutionBackend::without_execution()),
            &StaticSchemaProvider::builtin(),
        );
        bench.open(&id).expect("Open should succeed");
        bench
            .session_mut()
            .expect("Session should exist")
            .move_node("start", Position { x: 50.0, y: 50.0 });

        let err = bench.run(&JsonMap::new()).expect_err("Run should fail");
        assert!(matches!(
            err,
            WorkbenchError::Backend(BackendError::Unsupported(_))
        ));
        // The message reaches callers word for word.
        assert_eq!(
            err.to_string(),
            "Execution is not supported by the active backend"
        );
        assert!(!bench.is_busy());
        assert!(bench.session().is_some());

        // The implicit save still went through before the backend refused.
        bench.open(&id).expect("Reopen should succeed");
        let start = bench
            .document()
            .expect("Baseline should exist")
            .find_node("start")
            .expect("Start node should exist")
            .position();
        assert_eq!(start, Some(Position { x: 50.0, y: 50.0 }));

        println!("Backend refusal surfaced: {}", err);
    }

    #[test]
    fn test_transpile_targets() {
        let (mut bench, id) = seeded_workbench(two_node_document());
        bench.open(&id).expect("Open should succeed");

        let generated = bench
            .transpile(DEFAULT_TARGET)
            .expect("Transpile should succeed");
        assert!(generated.code.contains("def main"));
        assert!(generated.code.contains(&id));
        println!("Generated {} bytes of code", generated.code.len());

        let err = bench.transpile("ruby").expect_err("Unknown target should fail");
        assert_eq!(err.to_string(), "Unsupported target: ruby");
        assert!(!bench.is_busy());

        // Download plumbing constants for shells saving the output.
        assert_eq!(CODE_FILENAME, "workflow.py");
        assert_eq!(CODE_MIME, "text/python");
    }

    #[test]
    fn test_create_starts_from_template() {
        let mut bench = Workbench::new(
            Box::new(MemoryDocumentStore::new()),
            Box::new(MockExecutionBackend::new()),
            &StaticSchemaProvider::builtin(),
        );

        let id = bench.create().expect("Create should succeed");
        assert_eq!(id, "wf-1");
        assert_eq!(bench.open_id(), Some("wf-1"));

        let document = bench.document().expect("Baseline should exist");
        assert_eq!(document.name(), Some("New Workflow"));

        let session = bench.session().expect("Session should exist");
        assert_eq!(session.graph().nodes.len(), 2);
        // Template positions are stored, not fallback slots.
        assert_eq!(
            session.graph().nodes[1].position,
            Position { x: 400.0, y: 100.0 }
        );

        let listing = bench.list().expect("List should succeed");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "New Workflow");
    }

    #[test]
    fn test_listing_untitled_documents() {
        let (bench, id) = seeded_workbench(two_node_document());
        let listing = bench.list().expect("List should succeed");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, id);
        assert_eq!(listing[0].name, "Untitled");
    }

    #[test]
    fn test_listing_follows_creation_order() {
        let mut store = MemoryDocumentStore::new();
        for _ in 0..11 {
            store.seed(two_node_document());
        }
        let bench = Workbench::new(
            Box::new(store),
            Box::new(MockExecutionBackend::new()),
            &StaticSchemaProvider::builtin(),
        );

        let listing = bench.list().expect("List should succeed");
        let ids: Vec<&str> = listing.iter().map(|summary| summary.id.as_str()).collect();
        // Two-digit serials stay behind single-digit ones instead of sorting
        // between wf-1 and wf-2.
        assert_eq!(ids[0], "wf-1");
        assert_eq!(ids[1], "wf-2");
        assert_eq!(ids[9], "wf-10");
        assert_eq!(ids[10], "wf-11");
    }

    #[test]
    fn test_open_failure_keeps_previous_document() {
        let (mut bench, id) = seeded_workbench(two_node_document());
        bench.open(&id).expect("Open should succeed");

        let err = bench.open("wf-99").expect_err("Unknown id should fail");
        assert!(matches!(
            err,
            WorkbenchError::Store(StoreError::NotFound(_))
        ));
        assert!(err.to_string().contains("wf-99"));

        // The failed open never disturbs the workflow already on screen.
        assert_eq!(bench.open_id(), Some(id.as_str()));
        assert!(bench.session().is_some());
    }

    #[test]
    fn test_operations_require_an_open_document() {
        let (mut bench, _id) = seeded_workbench(two_node_document());

        assert!(matches!(
            bench.save().expect_err("Save should fail"),
            WorkbenchError::NoDocument
        ));
        assert!(matches!(
            bench.run(&JsonMap::new()).expect_err("Run should fail"),
            WorkbenchError::NoDocument
        ));
        assert!(matches!(
            bench.transpile(DEFAULT_TARGET).expect_err("Transpile should fail"),
            WorkbenchError::NoDocument
        ));
        assert!(!bench.is_busy());
    }

    #[test]
    fn test_failed_save_keeps_baseline() {
        let mut inner = MemoryDocumentStore::new();
        let id = inner.seed(two_node_document());
        let mut bench = Workbench::new(
            Box::new(FailingStore { inner }),
            Box::new(MockExecutionBackend::new()),
            &StaticSchemaProvider::builtin(),
        );
        bench.open(&id).expect("Open should succeed");
        bench
            .session_mut()
            .expect("Session should exist")
            .move_node("start", Position { x: 50.0, y: 50.0 });

        let err = bench.save().expect_err("Save should fail");
        assert!(matches!(
            err,
            WorkbenchError::Store(StoreError::Internal(_))
        ));
        assert!(!bench.is_busy());

        // The baseline still describes the last stored document, while the
        // canvas keeps the unsaved move for a retry.
        let baseline = bench.document().expect("Baseline should exist");
        let start = baseline.find_node("start").expect("Start node should exist");
        assert_eq!(start.position(), None);
        let session = bench.session().expect("Session should exist");
        assert_eq!(
            session.graph().find_node("start").expect("Node should exist").position,
            Position { x: 50.0, y: 50.0 }
        );

        println!("Save failure left baseline untouched: {}", err);
    }

    #[test]
    fn test_unreachable_schemas_degrade_to_empty_cache() {
        let mut store = MemoryDocumentStore::new();
        let id = store.seed(two_node_document());
        let mut bench = Workbench::new(
            Box::new(store),
            Box::new(MockExecutionBackend::new()),
            &OfflineSchemaProvider,
        );

        // Editing carries on without parameter forms.
        assert!(bench.schemas().is_empty());
        bench.open(&id).expect("Open should succeed");
        assert!(bench.select("start"));
        let form = bench
            .session()
            .expect("Session should exist")
            .form()
            .expect("Form should be open");
        assert!(!form.has_params());
    }

    #[test]
    fn test_prelude_import_completeness() {
        // Verify that the prelude exports work correctly
        let _bench: Option<Workbench> = None;
        let _session: Option<EditSession> = None;
        let _document: Option<WorkflowDocument> = None;
        let _graph: Option<CanvasGraph> = None;
        let _form: Option<NodeConfigForm> = None;
        let _cache: Option<SchemaCache> = None;
        let _store: Option<MemoryDocumentStore> = None;
        let _map: JsonMap = JsonMap::new();

        // Test Result alias
        let _result: Result<String> = Ok("test".to_string());

        println!("All prelude types are accessible");
    }
}
