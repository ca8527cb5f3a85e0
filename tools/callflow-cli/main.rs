use callflow::prelude::*;
use clap::Parser;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Lays out a call-flow description and prints the diagram as JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow description (JSON, optionally wrapped in a code fence)
    input_path: String,

    /// Subject the diagram is cached under
    #[arg(short, long, default_value = "default")]
    subject: String,

    /// Directory of the durable cache; without it the cache lives in memory
    #[arg(long)]
    cache_dir: Option<String>,

    /// Regenerate even if the cache holds a diagram for this input
    #[arg(short, long)]
    force: bool,

    /// Optional JSON file with layout settings
    #[arg(short, long)]
    config: Option<String>,

    /// Where to write the diagram; stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    let input = fs::read_to_string(&cli.input_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read input file '{}': {}",
            cli.input_path, e
        ))
    });

    let engine = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read layout config '{}': {}", path, e))
            });
            let config = LayoutConfig::from_json(&text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse layout config '{}': {}", path, e))
            });
            LayoutEngine::new(config)
        }
        None => LayoutEngine::default(),
    };

    let options = GenerateOptions { force: cli.force };
    let diagram = match &cli.cache_dir {
        Some(dir) => {
            let store = FileStore::open(dir).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to open cache directory '{}': {}", dir, e))
            });
            FlowGenerator::builder(JsonExtractor, store)
                .with_layout_engine(engine)
                .build()
                .generate(&cli.subject, &input, options)
        }
        None => FlowGenerator::builder(JsonExtractor, MemoryStore::new())
            .with_layout_engine(engine)
            .build()
            .generate(&cli.subject, &input, options),
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Flow generation failed: {}", e)));

    let json = if cli.pretty {
        serde_json::to_string_pretty(&diagram)
    } else {
        serde_json::to_string(&diagram)
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize diagram: {}", e)));

    match &cli.output {
        Some(path) => fs::write(path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write output '{}': {}", path, e))
        }),
        None => println!("{}", json),
    }

    eprintln!(
        "{} nodes, {} edges, {} ranks ({}) in {:?}",
        diagram.graph.nodes().len(),
        diagram.graph.edges().len(),
        diagram.layout.rank_count,
        if diagram.from_cache {
            "cached"
        } else {
            "generated"
        },
        total_start.elapsed()
    );
    for diagnostic in &diagram.diagnostics {
        eprintln!("  warning: {}", diagnostic);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
