use eyre::{Result, WrapErr};
use figment::Figment;
use indicatif::{ProgressBar, ProgressStyle};
use std::{borrow::Cow, path::Path, time::Duration};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};
use voyager_common::shell;
use voyager_config::Config;

/// Initializes a tracing subscriber for logging.
///
/// The filter is read from `RUST_LOG` and defaults to warnings only. Logs go to stderr so they
/// never mix with command output.
pub fn subscriber() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    if let Err(err) = registry.try_init() {
        debug!("tracing subscriber already installed: {err}");
    }
}

/// Loads a dotenv file from the current working directory, if present.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv() {
    let Ok(cwd) = std::env::current_dir() else { return };
    load_dotenv_from(&cwd);
}

fn load_dotenv_from(dir: &Path) {
    let path = dir.join(".env");
    if path.is_file() {
        match dotenvy::from_path(&path) {
            Ok(()) => trace!(?path, "loaded .env"),
            Err(err) => warn!(?path, %err, "failed to load .env"),
        }
    }
}

/// Loads the [`Config`] with the given CLI options merged on top.
pub trait LoadConfig {
    fn load_config(&self) -> Result<Config>;
}

impl<T: figment::Provider + Clone> LoadConfig for T {
    fn load_config(&self) -> Result<Config> {
        let figment: Figment = Config::figment().merge(self.clone());
        Config::from_provider(figment).wrap_err("failed to load voyager config")
    }
}

/// A spinner shown while waiting on the chain. Hidden when output is quiet.
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    if shell::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
