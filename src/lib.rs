pub mod api;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use config::Config;
use models::SourceSelection;
use state::SharedState;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "serve" | "daemon" | "-d" | "--daemon" => run_server(config).await,

        "search" | "s" => {
            if args.len() < 3 {
                println!("Usage: fixarr search <query> [source ...]");
                println!("Example: fixarr search \"iphone screen\" ifixit reddit");
                return Ok(());
            }
            let query = args[2].clone();
            let sources: Vec<String> = if args.len() > 3 {
                args[3..].to_vec()
            } else {
                vec!["all".to_string()]
            };
            cmd_search(config, &query, &sources).await
        }

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        _ => {
            println!("Unknown command: {}", args[1]);
            println!();
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Fixarr - Repair Guide Search Aggregator");
    println!("Merges iFixit guides, r/ifixit discussions, and video tutorials");
    println!();
    println!("USAGE:");
    println!("  fixarr <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  serve             Run the HTTP API server");
    println!("  search <query> [source ...]");
    println!("                    One-off search from the command line");
    println!("                    (sources: all, ifixit, reddit, youtube)");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  fixarr search \"iphone screen\"     # Search all sources");
    println!("  fixarr search toaster ifixit      # Guides only");
    println!("  fixarr serve                      # Start the API server");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml to configure the server port, database, etc.");
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Fixarr v{} starting in server mode...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;
    let state = api::create_app_state_from_config(config).await?;
    let app = api::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Search API running at http://{addr}");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    info!("Server running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

async fn cmd_search(config: Config, query: &str, sources: &[String]) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let shared = SharedState::new(config).await?;
    let selection = SourceSelection::from_request(sources);
    let outcome = shared.search_service.search(query, &selection).await?;

    if outcome.results.is_empty() {
        println!("No results found for '{query}'");
        return Ok(());
    }

    let origin = if outcome.cached { "cache" } else { "providers" };
    println!();
    println!(
        "Results ({} total, from {}):",
        outcome.results.len(),
        origin
    );
    println!("{:-<70}", "");

    for result in &outcome.results {
        println!(
            "[{:>3}] {} ({})",
            result.relevance_score, result.title, result.source_name
        );
        if let Some(description) = &result.description {
            println!("      {description}");
        }
        println!("      {}", result.source_url);
        println!();
    }

    Ok(())
}
