//! Voting webserver entry point

use clap::Parser;
use shared::{ProcessId, logging, process_info};
use tokio::signal;

use webserver::{
    FileEntrySource, RealStaticFileServer, RealWebSocketManager, ServerConfig, WebServer, WebServerResult,
    config::DEFAULT_PORT,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Pairwise bracket voting server")]
struct Args {
    /// Port for HTTP and WebSocket connections
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Interface to bind, as an IP address or a host name
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// JSON array of entry names, re-read on every reset
    #[arg(long, default_value = "entries.json")]
    entries: String,

    /// Static files directory
    #[arg(long, default_value = "./static")]
    static_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Tracing endpoint URL (if set, traces will be sent here)
    #[arg(long)]
    trace_ep: Option<String>,

    /// Outgoing frames buffered per browser session
    #[arg(long, default_value_t = webserver::config::DEFAULT_CLIENT_BUFFER)]
    client_buffer: usize,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    ProcessId::init_webserver();

    let trace_endpoint = args
        .trace_ep
        .as_ref()
        .map(|url| logging::TracingEndpoint::new(url.clone()));
    logging::init_tracing_with_endpoint_and_level(trace_endpoint, Some(&args.log_level));

    let config = ServerConfig::resolve(&args.host, args.port, &args.entries, &args.static_dir)
        .await?
        .with_client_buffer(args.client_buffer)?;

    logging::log_startup(
        ProcessId::current(),
        &format!("voting webserver (entries {}, static {})", config.entries_path.display(), config.static_dir.display()),
    );

    let webserver = WebServer::new(
        &config,
        RealWebSocketManager::new(),
        RealStaticFileServer::new(&config.static_dir),
        FileEntrySource::new(&config.entries_path),
    );

    let outcome = webserver.bootstrap().await?;
    process_info!(
        ProcessId::current(),
        "🗳️ Tournament ready at round {} with {} entries queued",
        outcome.state.round(),
        outcome.state.entries.len()
    );

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
            Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
        }
    };

    webserver.run(&config, shutdown).await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
