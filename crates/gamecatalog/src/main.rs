mod app;
mod auth;
mod cache;
mod config;
mod error;
mod handlers;
mod mailer;
mod notifier;
mod scheduler;
mod seed;
mod state;
mod storage;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use gamecatalog_core::notify::NotifyError;

use crate::{app::create_app, config::Config, state::AppState};

/// Game Catalog - Video game catalog API with a weekly release newsletter
#[derive(Parser, Debug)]
#[command(name = "gamecatalog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST", global = true)]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT", global = true)]
    port: u16,

    /// Emit logs as JSON lines (also enabled by `LOG_FORMAT=json`)
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Send the upcoming releases newsletter once and exit
    SendEmails,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_json = cli.log_json
        || std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    init_tracing(log_json);

    let config = Config::from_env();
    let state = AppState::new(&config).await?;

    if config.seed_demo_data && seed::seed_demo_data(state.store.as_ref(), today()).await? {
        tracing::info!("Demo catalog loaded");
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.host, cli.port, &config, state).await,
        Command::SendEmails => send_emails(&state).await,
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gamecatalog=debug,tower_http=debug".into());

    let format = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry().with(filter).with(format).init();
}

fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}

async fn serve(host: &str, port: u16, config: &Config, state: AppState) -> Result<()> {
    let scheduler = match config.notifier_trigger {
        Some(trigger) => Some(scheduler::spawn(
            state.notifier.clone(),
            trigger,
            state.subscribe_shutdown(),
        )),
        None => {
            tracing::info!("Release notifier disabled");
            None
        }
    };

    // Build the application router
    let app = create_app(state.clone());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{host}:{port}");
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    if let Some(handle) = scheduler {
        handle.await?;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// One notification pass for the `send-emails` command.
async fn send_emails(state: &AppState) -> Result<()> {
    match state.notifier.run_once(today()).await {
        Ok(report) => {
            println!("Email sent to {} users", report.notified);
            Ok(())
        }
        Err(NotifyError::PartialOrTotalSendFailure(report)) => {
            println!("Email sent to {} users", report.notified);
            for failure in &report.failed {
                eprintln!("Failed to send to {}: {}", failure.to, failure.reason);
            }
            anyhow::bail!("{} of {} emails failed", report.failed.len(), report.subscribers)
        }
        Err(err) => Err(err.into()),
    }
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM) and stop background tasks.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    state.signal_shutdown();
}
