use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use guestbook::client::render::{
    render_error_panel, render_message_card, render_notification, render_search_result,
};
use guestbook::client::{
    HttpGuestbookClient, SearchForm, SubmissionForm, SubmitState, DEFAULT_API_URL,
};
use guestbook::config::ServerConfig;
use guestbook::logging::{self, LogFormat};
use guestbook::routes::configure_routes;
use guestbook::storage::PostgresMessageStore;

#[derive(Debug, Parser)]
#[command(name = "guestbook", version, about = "Guestbook API server and client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (configured from the environment)
    Serve,
    /// Leave a message in the guestbook
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Show the latest message left by NAME
    Search {
        name: String,
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Debug, Args)]
struct ApiArgs {
    /// Base URL of the guestbook API
    #[arg(long, env = "GUESTBOOK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve => serve().await,
        Command::Submit { name, message, api } => submit(name, message, api).await,
        Command::Search { name, api } => search(name, api).await,
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    logging::init(&config.log_filter, config.log_format)?;

    let store = PostgresMessageStore::connect(&config.database).await?;
    store.ensure_schema().await?;

    let routes = configure_routes(Arc::new(store), &config.client_origin);
    let addr = config.socket_addr();

    tracing::info!(%addr, client_origin = %config.client_origin, "Starting guestbook server");
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("POST http://{}/api/messages", addr);
    tracing::info!("GET  http://{}/api/messages?name=NAME", addr);

    warp::serve(routes).run(addr).await;
    Ok(ExitCode::SUCCESS)
}

fn init_client_logging() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    logging::init(&filter, LogFormat::Compact)?;
    Ok(())
}

async fn submit(
    name: String,
    message: String,
    api: ApiArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_client_logging()?;
    let client = HttpGuestbookClient::new(api.api_url);

    let mut form = SubmissionForm::with_values(name, message);
    let Some(notification) = form.submit(&client).await else {
        let errors = form.errors();
        for error in [errors.name, errors.message].into_iter().flatten() {
            eprintln!("{}", error);
        }
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", render_notification(&notification));
    match form.state() {
        SubmitState::Submitted(stored) => {
            println!("{}", render_message_card(stored, &Local));
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            if let Some(err) = form.error_panel() {
                eprintln!("{}", render_error_panel(err));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn search(name: String, api: ApiArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_client_logging()?;
    let client = HttpGuestbookClient::new(api.api_url);

    let mut form = SearchForm::new();
    form.set_term(name);

    let notification = form.search(&client).await;
    if let Some(error) = form.error() {
        eprintln!("{}", error);
        return Ok(ExitCode::FAILURE);
    }
    if let Some(notification) = notification {
        eprintln!("{}", render_notification(&notification));
    }

    if let Some(result) = render_search_result(&form, &Local) {
        println!("{}", result);
    }

    Ok(if form.error_panel().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
