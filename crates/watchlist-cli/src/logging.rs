use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// `-q` wins over `-v`; without either, `RUST_LOG` decides and defaults to info
fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    let default_directives = match verbose_level {
        0 => "info",
        // Debug without hyper's per-connection chatter
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Split `dir/watchlist.log` into the directory and the rotation prefix `watchlist`
fn rotation_target(log_path: &Path) -> Result<(PathBuf, String)> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let log_prefix = log_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(log_filename);
    Ok((log_dir.to_path_buf(), log_prefix.to_string()))
}

pub fn init_logging_with_file(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = log_file {
        let (log_dir, log_prefix) = rotation_target(&log_path)?;
        std::fs::create_dir_all(&log_dir)?;

        // watchlist.2026-10-18, watchlist.2026-10-19, ...
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_target() {
        let (dir, prefix) = rotation_target(Path::new("/var/log/watchlist/watchlist.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/watchlist"));
        assert_eq!(prefix, "watchlist");

        let (_, prefix) = rotation_target(Path::new("/tmp/plain")).unwrap();
        assert_eq!(prefix, "plain");
    }
}
