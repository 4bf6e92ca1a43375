//! Answer CLI - resolve a query from the command line
//!
//! Usage:
//!     answer "2 + 3 * 4"
//!     answer --json "10 km to miles"
//!     answer --config engine.json "sha256 hello"
//!     answer --list-plugins
//!
//! Exit status is 0 when a plugin answered, 2 when none did and 1 on error.

use std::path::PathBuf;
use std::process::ExitCode;

use answer_core::{Answer, EngineConfig, QueryContext, Registry};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "answer")]
#[command(about = "Resolve a search query into an instant answer")]
#[command(version)]
struct Args {
    /// The query to answer
    #[arg(required_unless_present = "list_plugins")]
    query: Option<String>,

    /// Output the answer as JSON
    #[arg(long)]
    json: bool,

    /// List registered plugins and exit
    #[arg(long)]
    list_plugins: bool,

    /// Path to an engine config JSON file (default: environment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output (dispatch logging on stderr)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "answer_core=trace".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path),
        None => EngineConfig::from_env(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(1);
        }
    };

    let registry = match Registry::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error building registry: {}", e);
            return ExitCode::from(1);
        }
    };

    if args.list_plugins {
        output_plugins(&registry, args.json);
        return ExitCode::SUCCESS;
    }

    let query = args.query.unwrap_or_default();
    let ctx = QueryContext::new();

    match registry.resolve(&ctx, &query).await {
        Ok(Some(answer)) => {
            if args.json {
                output_json(&answer);
            } else {
                output_rendered(&answer);
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            if args.verbose {
                eprintln!("No answer for \"{}\"", query.trim());
            }
            ExitCode::from(2)
        }
        Err(e) => {
            if args.json {
                match serde_json::to_string_pretty(&e.to_error_response()) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("Error: {}", e),
                }
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(1)
        }
    }
}

fn output_json(answer: &Answer) {
    match serde_json::to_string_pretty(answer) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing answer: {}", e),
    }
}

fn output_rendered(answer: &Answer) {
    println!("{}", answer.title);
    println!("{}", answer.plain_text());
}

fn output_plugins(registry: &Registry, json: bool) {
    let plugins = registry.list();

    if json {
        match serde_json::to_string_pretty(&plugins) {
            Ok(out) => println!("{}", out),
            Err(e) => eprintln!("Error serializing plugins: {}", e),
        }
        return;
    }

    for info in plugins {
        println!("{:<12} {}", info.name, info.description);
        for example in &info.examples {
            println!("{:<12}   e.g. {}", "", example);
        }
    }
}
