//! Verolix: patient records and doctor lookup in the terminal.
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use verolix::adapters::sanitize::SanitizingMakeWriter;
use verolix::config::AppConfig;
use verolix::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // an interactive TTY logs to a file, anything else to stdout.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces when the file is opened.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!(
        latency_scale = config.latency_scale,
        "Starting Verolix..."
    );

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Verolix shutdown complete.");
    Ok(())
}
