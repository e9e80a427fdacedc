use crate::{config::Config, *};
use std::{fs, io::Error};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};


/// Read text file
pub fn read_text_file(name: &str) -> Result<String, Error> {
    fs::read_to_string(name)
}


/// Install a fmt subscriber with level taken from configuration.
/// RUST_LOG takes precedence when defined.
pub fn setup_logger(config: &Config) -> Result<(), TryInitError> {
    let level = config.get_log_level();
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    debug!("Logger initialized with level: {}", level);
    Ok(())
}


/// Strip surrounding whitespace and trailing slashes from base URL
pub fn trim_base_url(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}
