use kairo::prelude::*;
use serde_json::json;
use std::env;
use std::fs;

fn main() {
    // Create output directory
    const TMP_DIR: &str = "tmp";
    if let Err(e) = fs::create_dir_all(TMP_DIR) {
        eprintln!("Failed to create tmp directory: {}", e);
        std::process::exit(1);
    }

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: cargo run -- [path/to/workflow.json]");
        std::process::exit(1);
    }

    // Seed the store with either the provided file or the starter template
    let mut store = MemoryDocumentStore::new();
    match args.get(1) {
        Some(path) => {
            println!("Loading workflow from: {}", path);
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Failed to read workflow file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            let document: WorkflowDocument = match serde_json::from_str(&text) {
                Ok(document) => document,
                Err(e) => {
                    eprintln!("Failed to parse workflow file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            store.seed(document);
        }
        None => {
            println!("No workflow file provided. Using the starter template.");
            store.seed(starter_document());
        }
    }

    let mut bench = Workbench::new(
        Box::new(store),
        Box::new(MockExecutionBackend::new()),
        &StaticSchemaProvider::builtin(),
    );

    // Directory listing
    let summaries = match bench.list() {
        Ok(summaries) => summaries,
        Err(e) => {
            eprintln!("Failed to list workflows: {}", e);
            std::process::exit(1);
        }
    };
    println!("\nAvailable workflows:");
    for summary in &summaries {
        println!("  -> {} ({})", summary.name, summary.id);
    }

    let first_id = summaries[0].id.clone();
    if let Err(e) = bench.open(&first_id) {
        eprintln!("Failed to open workflow '{}': {}", first_id, e);
        std::process::exit(1);
    }

    // Canvas projection
    println!("\nCanvas projection:");
    if let Some(session) = bench.session() {
        for node in &session.graph().nodes {
            println!(
                "  -> {} at ({:.0}, {:.0})",
                node.data.label, node.position.x, node.position.y
            );
        }
        for edge in &session.graph().edges {
            println!("  -> edge {}: {} to {}", edge.id, edge.source, edge.target);
        }
    }

    // Editing phase
    println!("\nEditing: adding an LLM step via the context menu...");
    let llm_id = match bench.session_mut() {
        Some(session) => {
            session.open_menu(ScreenPoint { x: 420.0, y: 180.0 });
            let Some(id) = session.add_node_from_menu("LLM") else {
                eprintln!("Context menu was not open");
                std::process::exit(1);
            };
            session.connect("start", &id);
            id
        }
        None => {
            eprintln!("No open session");
            std::process::exit(1);
        }
    };
    println!("  -> Added '{}' and connected it to 'start'", llm_id);

    // Configure the new node through its schema-generated form
    println!("Configuring '{}' through its schema form...", llm_id);
    bench.select(&llm_id);
    if let Some(session) = bench.session_mut() {
        if let Some(form) = session.form_mut() {
            form.set_param("system_prompt", json!("Answer in one sentence."));
            form.set_param("temperature", json!(0.2));
            form.inputs_text = "{\n  \"prompt\": \"question\"\n}".to_string();
        }
        if let Err(e) = session.confirm_editor() {
            eprintln!("Configuration rejected: {}", e);
            std::process::exit(1);
        }
    }

    // Persistence phase
    println!("\nSaving...");
    if let Err(e) = bench.save() {
        eprintln!("Save failed: {}", e);
        std::process::exit(1);
    }
    if let Some(document) = bench.document() {
        let pretty = match serde_json::to_string_pretty(document) {
            Ok(pretty) => pretty,
            Err(e) => {
                eprintln!("Failed to render document: {}", e);
                std::process::exit(1);
            }
        };
        let json_path = format!("{}/workflow.json", TMP_DIR);
        if let Err(e) = fs::write(&json_path, pretty) {
            eprintln!("Failed to write document to '{}': {}", json_path, e);
            std::process::exit(1);
        }
        println!("  -> Wrote persisted document to '{}'", json_path);
        println!(
            "  -> {} nodes, {} edges",
            document.nodes.len(),
            document.edges.len()
        );
    }

    // Transpilation phase
    println!("\nTranspiling to '{}'...", DEFAULT_TARGET);
    match bench.transpile(DEFAULT_TARGET) {
        Ok(generated) => {
            let code_path = format!("{}/{}", TMP_DIR, CODE_FILENAME);
            if let Err(e) = fs::write(&code_path, &generated.code) {
                eprintln!("Failed to write generated code to '{}': {}", code_path, e);
                std::process::exit(1);
            }
            println!("  -> Wrote generated code to '{}'", code_path);
        }
        Err(e) => {
            eprintln!("Transpile failed: {}", e);
            std::process::exit(1);
        }
    }

    // Execution phase. A backend refusal is part of the output, not a crash.
    println!("\nRunning...");
    match bench.run(&JsonMap::new()) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", result),
        },
        Err(e) => println!("Error: {}", e),
    }
    println!();
}
