use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{FmtSubscriber, EnvFilter};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber
///
/// With a directory, output goes to a timestamped log file inside it (the
/// directory is created if needed); without one, output goes to stdout.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(false);

    match log_dir {
        Some(dir) => {
            if !Path::new(dir).exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir))?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/campaign_qr_api_{}.log", dir, timestamp);
            let file = fs::File::create(&log_file)
                .with_context(|| format!("Failed to create log file {}", log_file))?;

            let subscriber = builder.with_ansi(false).with_writer(file).finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized, writing to {}", log_file);
        }
        None => {
            let subscriber = builder.finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized");
        }
    }

    Ok(())
}
