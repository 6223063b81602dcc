use std::fs::File;
use std::io::{self, BufReader, Write};

use compat_engine::config::{LoggingSettings, Settings};
use compat_engine::services::{read_request, AnalysisService, ReportError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn run(settings: &Settings) -> Result<(), ReportError> {
    let request = match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            info!("Reading analysis request from {}", path);
            read_request(BufReader::new(File::open(path)?))?
        }
        _ => {
            info!("Reading analysis request from stdin");
            read_request(io::stdin().lock())?
        }
    };

    let service = AnalysisService::from_settings(settings);
    info!(
        "Scoring with weights: {:?}, cache capacity {:?}",
        service.engine().weights(),
        settings.cache.max_capacity
    );

    let report = service.run_report(&request).await?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;

    info!("Report {} written", report.report_id);
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_logging(
        settings
            .as_ref()
            .map(|s| &s.logging)
            .unwrap_or(&LoggingSettings::default()),
    );

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    run(&settings).await.map_err(|e| {
        error!("Analysis failed: {}", e);
        match e {
            ReportError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    })
}
