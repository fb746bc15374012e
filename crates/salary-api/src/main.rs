//! salary-api - HTTP API server for salary-predict

use std::net::SocketAddr;
use std::path::Path;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use salary_api::{build_router, AppState, ServerConfig};
use salary_inference::{PredictorConfig, PredictorHandle};

const DEFAULT_FILTER: &str = "salary_api=debug,salary_inference=debug,tower_http=debug";
const DEFAULT_LOG_FILE_NAME: &str = "salary-api.log";

/// Logging options read from the environment.
///
/// - `LOG_FORMAT`: "json" or "text" (default "text")
/// - `LOG_FILE`: daily-rolled log file instead of stdout
/// - `LOG_ANSI`: force ANSI colors on or off
/// - `RUST_LOG`: filter directives
struct LogSettings {
    json: bool,
    file: Option<String>,
    ansi: Option<bool>,
}

impl LogSettings {
    fn from_env() -> Self {
        Self {
            json: std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
            file: std::env::var("LOG_FILE").ok().filter(|v| !v.is_empty()),
            ansi: std::env::var("LOG_ANSI")
                .ok()
                .map(|v| v == "true" || v == "1"),
        }
    }

    /// Writer for the fmt layer; the guard must outlive the server when
    /// logging to a file.
    fn writer(&self) -> (BoxMakeWriter, Option<WorkerGuard>) {
        let Some(path) = self.file.as_deref() else {
            return (BoxMakeWriter::new(std::io::stdout), None);
        };
        let path = Path::new(path);
        let dir = path.parent().unwrap_or(Path::new("."));
        let name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE_NAME);
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
        (BoxMakeWriter::new(writer), Some(guard))
    }
}

fn init_tracing(settings: &LogSettings) -> Option<WorkerGuard> {
    let (writer, guard) = settings.writer();
    // Colors only on the console unless LOG_ANSI says otherwise.
    let ansi = settings.ansi.unwrap_or(settings.file.is_none());

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if settings.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .boxed()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = LogSettings::from_env();
    let _log_guard = init_tracing(&settings);
    info!(
        format = if settings.json { "json" } else { "text" },
        destination = settings.file.as_deref().unwrap_or("stdout"),
        "Logging initialized"
    );

    let config = ServerConfig::from_env();

    // Artifacts load once; failure leaves the server up but unhealthy.
    let predictor = PredictorHandle::bootstrap(&PredictorConfig::from_env());
    if predictor.is_ready() {
        info!("Predictor loaded");
    }

    let app = build_router(AppState::new(predictor, &config), &config);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
