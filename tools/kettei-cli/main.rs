use clap::{Parser, ValueEnum};
use kettei::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Evaluates a JSON decision tree against named arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the decision tree JSON file
    tree_path: String,
    /// Optional path to a JSON object of named arguments
    arguments_path: Option<String>,

    /// Extra argument as name=value; repeatable, overrides the arguments file
    #[arg(short, long = "arg", value_name = "NAME=VALUE")]
    args: Vec<String>,

    /// Output format of the evaluation result
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the tree outline before evaluating
    #[arg(long)]
    show_tree: bool,

    /// Maximum number of questions a single evaluation may traverse
    #[arg(long, default_value_t = kettei::evaluator::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let start = Instant::now();
    let tree_json = fs::read_to_string(&cli.tree_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read tree file '{}': {}", cli.tree_path, e))
    });
    let tree = TreeDefinition::from_json(&tree_json)
        .and_then(|def| def.into_tree(&PredicateCatalog::new()))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load tree: {}", e)));

    let evaluator = Evaluator::builder().max_depth(cli.max_depth).build();
    evaluator
        .validate(&tree)
        .unwrap_or_else(|e| exit_with_error(&format!("Tree validation failed: {}", e)));
    tracing::info!(
        questions = tree.node_count(),
        depth = tree.depth(),
        elapsed = ?start.elapsed(),
        "tree loaded"
    );

    if cli.show_tree {
        println!("{}", tree);
    }

    let args = load_arguments(&cli);
    let result = evaluator
        .eval(&tree, &args)
        .unwrap_or_else(|e| exit_with_error(&format!("Evaluation failed: {}", e)));

    match cli.format {
        OutputFormat::Text => print!("{}", TraceFormatter::format_result(&result)),
        OutputFormat::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with_error(&format!("Failed to serialize result: {}", e)),
        },
    }
}

fn load_arguments(cli: &Cli) -> Arguments {
    let mut args = match &cli.arguments_path {
        Some(path) => {
            let content = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read arguments file '{}': {}", path, e))
            });
            serde_json::from_str::<serde_json::Value>(&content)
                .map_err(|e| e.to_string())
                .and_then(|json| Arguments::from_json(&json).map_err(|e| e.to_string()))
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid arguments file: {}", e)))
        }
        None => Arguments::new(),
    };

    for raw in &cli.args {
        let (name, value) = raw.split_once('=').unwrap_or_else(|| {
            exit_with_error(&format!("Argument '{}' is not of the form name=value", raw))
        });
        args.insert(name.trim(), parse_value(value.trim()));
    }
    args
}

/// Reads a command-line value as an integer, float or bool, falling back to a string.
fn parse_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::Float(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        Value::Bool(b)
    } else {
        Value::Str(raw.to_string())
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .try_init()
        .unwrap_or_else(|e| eprintln!("Error: Failed to set up logging: {}", e));
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
