use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use clap::{Parser, Subcommand};
use http::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tokio::net::TcpListener;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use anyhow::anyhow;

use interview_relay::{
    ServerConfig,
    core::feedback::{FeedbackStore, FileStorage, InterviewToolHandlers, TracingNotifier},
    core::tools::{ToolCallEvent, ToolDispatcher, tool_definitions},
    routes,
    state::AppState,
};

/// Interview Relay - ephemeral realtime credentials and interview tools
#[derive(Parser, Debug)]
#[command(name = "interview-relay")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP relay
    Serve,

    /// Print the tool catalog as JSON
    Tools,

    /// Print the stored interview feedback history
    Feedback {
        /// Print raw JSON instead of the plain-text export
        #[arg(long)]
        json: bool,
    },

    /// Run one tool call against the local feedback store
    Dispatch {
        /// Tool name, e.g. saveInterviewFeedback
        name: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,

        /// Provider call id to echo in the result event
        #[arg(long)]
        call_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize crypto provider for TLS connections
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    // The catalog is static and needs no configuration
    if let Some(Commands::Tools) = cli.command {
        println!("{}", serde_json::to_string_pretty(&tool_definitions())?);
        return Ok(());
    }

    let config = if let Some(config_path) = cli.config {
        println!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Tools => Ok(()),
        Commands::Feedback { json } => print_feedback(&config, json),
        Commands::Dispatch {
            name,
            args,
            call_id,
        } => dispatch_tool(&config, &name, &args, call_id),
    }
}

fn feedback_store(config: &ServerConfig) -> FeedbackStore {
    FeedbackStore::new(Arc::new(FileStorage::new(
        config.feedback_storage_path.clone(),
    )))
}

fn print_feedback(config: &ServerConfig, json: bool) -> anyhow::Result<()> {
    let records = feedback_store(config).load();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No interview feedback recorded yet.");
    } else {
        let blocks: Vec<String> = records.iter().map(|r| r.to_export_text()).collect();
        println!("{}", blocks.join("\n\n"));
    }

    Ok(())
}

fn dispatch_tool(
    config: &ServerConfig,
    name: &str,
    args: &str,
    call_id: Option<String>,
) -> anyhow::Result<()> {
    let handlers = InterviewToolHandlers::new(feedback_store(config), Arc::new(TracingNotifier));
    let dispatcher = ToolDispatcher::with_handlers(Arc::new(handlers));
    dispatcher
        .ensure_complete()
        .map_err(|e| anyhow!(e.to_string()))?;

    let arguments = ToolCallEvent::parse_arguments(args).map_err(|e| anyhow!(e))?;
    let mut event = ToolCallEvent::new(name, arguments);
    if let Some(call_id) = call_id {
        event = event.with_call_id(call_id);
    }

    let result = dispatcher.dispatch(&event);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        anyhow::bail!("Tool call failed");
    }
    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let address = config.address();
    let tls_config = config.tls.clone();
    let rate_limit_rps = config.rate_limit_requests_per_second;
    let rate_limit_burst = config.rate_limit_burst_size;
    let cors_origins = config.cors_allowed_origins.clone();

    if config.require_api_key().is_err() {
        tracing::warn!("OPENAI_API_KEY is not set; session requests will fail until it is");
    }

    println!("Starting server on {address}");

    let app_state = AppState::new(config).map_err(|e| anyhow!(e.to_string()))?;

    // Configure rate limiting (disabled when rate >= 100000 for performance testing)
    let governor_layer = if rate_limit_rps < 100000 {
        let governor_config = GovernorConfigBuilder::default()
            .per_second(rate_limit_rps as u64)
            .burst_size(rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow!("Failed to build rate limiter config"))?;
        Some(GovernorLayer::new(governor_config))
    } else {
        println!("Rate limiting disabled (rate >= 100000/s)");
        None
    };

    let cors_layer = build_cors_layer(cors_origins.as_deref());

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ));

    let app: Router = routes::api::create_api_router()
        .with_state(app_state)
        .layer(cors_layer)
        .layer(tower::util::option_layer(governor_layer))
        .layer(security_headers);

    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    if let Some(tls) = tls_config {
        let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to load TLS certificates from {} and {}: {}",
                    tls.cert_path.display(),
                    tls.key_path.display(),
                    e
                )
            })?;

        println!("Server listening on https://{} (TLS enabled)", socket_addr);

        axum_server::bind_rustls(socket_addr, rustls_config)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|e| anyhow!("TLS server error: {}", e))?;
    } else {
        println!("Server listening on http://{}", socket_addr);

        let listener = TcpListener::bind(&socket_addr).await?;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}

fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let headers = [AUTHORIZATION, CONTENT_TYPE];

    match origins {
        Some("*") => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(false),
        Some(origins) => {
            // Parse comma-separated origins
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(methods)
                .allow_headers(headers)
                .allow_credentials(true)
        }
        None => {
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            // No allow_origin = same-origin only
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers(headers)
                .allow_credentials(false)
        }
    }
}
