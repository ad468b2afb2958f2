use clap::Parser;
use itertools::Itertools;
use kairo::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// Command-line workbench for node-based workflow documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow document JSON file
    workflow_path: Option<String>,

    /// Optional path to a node schema JSON file (type name -> JSON Schema)
    #[arg(short, long)]
    schemas: Option<String>,

    /// Transpilation target
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    target: String,

    /// Directory generated files are written to
    #[arg(short, long, default_value = "tmp")]
    out_dir: String,

    /// Execute the workflow after transpiling
    #[arg(short, long)]
    run: bool,

    /// Print the configuration form fields for one node type and exit
    #[arg(short, long, value_name = "TYPE")]
    fields: Option<String>,

    /// Print the starter workflow template as JSON and exit
    #[arg(long)]
    template: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.template {
        print_template();
        return;
    }

    let schemas = load_schemas(cli.schemas.as_deref());

    if let Some(node_type) = cli.fields.as_deref() {
        print_fields(schemas, node_type);
        return;
    }

    if cli.human {
        run_interactive(schemas);
    } else {
        run_non_interactive(cli, schemas);
    }
}

/// Loads the node schema mapping from a file, or falls back to the stock set.
fn load_schemas(path: Option<&str>) -> JsonMap {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read schema file '{}': {}", path, e))
            });
            serde_json::from_str(&text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse schema file '{}': {}", path, e))
            })
        }
        None => builtin_schemas(),
    }
}

/// Prints the starter document a newly created workflow begins from.
fn print_template() {
    match serde_json::to_string_pretty(&starter_document()) {
        Ok(pretty) => println!("{}", pretty),
        Err(e) => exit_with_error(&format!("Failed to render template: {}", e)),
    }
}

/// Prints the configuration form a node type would render.
fn print_fields(schemas: JsonMap, node_type: &str) {
    let cache = SchemaCache::new(schemas);
    let fields = cache.form_fields(node_type);

    if fields.is_empty() {
        println!("No parameters available for node type '{}'.", node_type);
        println!("Known types: {}", cache.node_types().join(", "));
        return;
    }

    println!("Configuration fields for '{}':", node_type);
    for field in fields {
        let requirement = if field.required { "required" } else { "optional" };
        println!(
            "  -> {} ({:?}, widget {:?}, {})",
            field.name, field.kind, field.widget, requirement
        );
        if let Some(default) = &field.default {
            println!("       default: {}", default);
        }
    }
}

fn run_pipeline(
    workflow_path: String,
    schemas: JsonMap,
    target: String,
    out_dir: String,
    execute: bool,
) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let text = fs::read_to_string(&workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &workflow_path, e
        ))
    });
    let document: WorkflowDocument = serde_json::from_str(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workflow JSON: {}", e)));
    let load_duration = load_start.elapsed();

    fs::create_dir_all(&out_dir).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to create out dir '{}': {}", out_dir, e))
    });

    // --- 2. Workbench Setup ---
    let mut store = MemoryDocumentStore::new();
    let id = store.seed(document);
    let mut bench = Workbench::new(
        Box::new(store),
        Box::new(MockExecutionBackend::new()),
        &StaticSchemaProvider::new(schemas),
    );

    // --- 3. Canvas Projection ---
    println!("\nProjecting document onto the canvas...");
    let project_start = Instant::now();
    bench
        .open(&id)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to open workflow: {}", e)));
    let project_duration = project_start.elapsed();

    let (node_count, edge_count, unplaced, type_counts) = match bench.session() {
        Some(session) => {
            let graph = session.graph();
            let unplaced = graph
                .nodes
                .iter()
                .filter(|node| node.data.node.position().is_none())
                .count();
            let type_counts: Vec<(String, usize)> = graph
                .nodes
                .iter()
                .map(|node| node.data.node.node_type.clone())
                .counts()
                .into_iter()
                .sorted()
                .collect();
            (graph.nodes.len(), graph.edges.len(), unplaced, type_counts)
        }
        None => exit_with_error("No session available after opening the workflow"),
    };
    println!(
        "Projection complete: {} nodes, {} edges in {:?}",
        node_count, edge_count, project_duration
    );
    if unplaced > 0 {
        println!(
            "  -> {} node(s) carried no stored position; fallback layout assigned",
            unplaced
        );
    }

    // --- 4. Persistence Round Trip ---
    println!("\nPersisting the canvas state...");
    let save_start = Instant::now();
    bench
        .save()
        .unwrap_or_else(|e| exit_with_error(&format!("Save failed: {}", e)));
    let save_duration = save_start.elapsed();

    if let Some(persisted) = bench.document() {
        let pretty = serde_json::to_string_pretty(persisted)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to render document: {}", e)));
        let json_path = format!("{}/workflow.json", out_dir);
        fs::write(&json_path, pretty)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", json_path, e)));
        println!("  -> Wrote round-tripped document to '{}'", json_path);
    }

    // --- 5. Transpilation ---
    println!("\nTranspiling to '{}'...", target);
    let transpile_start = Instant::now();
    let generated = bench
        .transpile(&target)
        .unwrap_or_else(|e| exit_with_error(&format!("Transpile failed: {}", e)));
    let transpile_duration = transpile_start.elapsed();

    let code_path = format!("{}/{}", out_dir, CODE_FILENAME);
    fs::write(&code_path, &generated.code)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", code_path, e)));
    println!("  -> Wrote generated code to '{}'", code_path);

    // --- 6. Optional Execution ---
    if execute {
        println!("\nRunning workflow '{}'...", id);
        match bench.run(&JsonMap::new()) {
            Ok(result) => match serde_json::to_string_pretty(&result) {
                Ok(pretty) => println!("{}", pretty),
                Err(_) => println!("{}", result),
            },
            Err(e) => println!("Error: {}", e),
        }
    }

    // --- 7. Summaries ---
    let total_duration = total_start.elapsed();
    println!("\n--- Document Summary ---");
    println!("Nodes: {}", node_count);
    println!("Edges: {}", edge_count);
    for (node_type, count) in &type_counts {
        println!("  {} x {}", count, node_type);
    }

    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Canvas Projection:    {:?}", project_duration);
    println!("Persistence:          {:?}", save_duration);
    println!("Transpilation:        {:?}", transpile_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!("Target Used:          {}", target);
    println!();
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli, schemas: JsonMap) {
    let workflow_path = cli.workflow_path.unwrap_or_else(|| {
        exit_with_error("Workflow path is required in non-interactive mode.");
    });

    run_pipeline(workflow_path, schemas, cli.target, cli.out_dir, cli.run);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(schemas: JsonMap) {
    println!("--- Kairo Interactive Mode ---");

    let workflow_path = prompt_for_input("Enter workflow document path", Some("data/workflow.json"));
    let target = prompt_for_input("Enter transpilation target", Some(DEFAULT_TARGET));
    let out_dir = prompt_for_input("Enter output directory", Some("tmp"));

    let execute = loop {
        let choice = prompt_for_input("Execute after transpiling? (y/n)", Some("n"));
        match choice.trim() {
            "y" | "Y" => break true,
            "n" | "N" => break false,
            _ => println!("Invalid choice. Please enter y or n."),
        }
    };

    run_pipeline(workflow_path, schemas, target, out_dir, execute);
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
