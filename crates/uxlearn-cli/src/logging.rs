use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uxlearn_ux::config::DEFAULT_LOG_LEVEL;

pub const LOG_ENV: &str = "UXLEARN_LOG";

/// `--log-level`, then `UXLEARN_LOG`, then the config file.
pub fn resolve_level(flag: Option<&str>, env: Option<String>, configured: &str) -> String {
    flag.map(str::to_string)
        .or_else(|| env.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| configured.to_string())
}

pub fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    // stderr keeps --json stdout machine-readable
    let stderr_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
