//! Usage: Tracing setup (env filter + stderr + daily rolling file under `<app dir>/logs`).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "clock-shell.log";

// Keeps the non-blocking file writer flushing for the lifetime of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn default_directives(default_level: &str) -> String {
    format!("{default_level},tao=warn,wry=warn,tauri=info,clock_shell_lib={default_level}")
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(default_level)))
}

pub(crate) fn init(app: &tauri::AppHandle, default_level: &str) {
    let file_layer = match app_paths::logs_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        Err(err) => {
            eprintln!("file logging disabled: {err}");
            None
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing subscriber already installed: {err}");
        return;
    }

    // Route `log` records from tauri and its plugins into tracing.
    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::debug!("log bridge not installed: {}", err);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %default_level,
        "logging initialized"
    );
}
