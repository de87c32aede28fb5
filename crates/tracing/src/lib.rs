use std::env::{self, VarError};

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

pub const ENV: &str = "QP_LOG";

struct LoggerConfig {
    filter: Result<String, VarError>,
}

impl LoggerConfig {
    fn from_env() -> Self {
        let filter = env::var(ENV);
        Self { filter }
    }
}

/// Installs a hierarchical stderr logger filtered by `QP_LOG`
/// (e.g. `QP_LOG=qp_linearize=debug`). Does nothing when the variable is
/// unset, and keeps the first subscriber when called again.
pub fn init_tracing() {
    let cfg = LoggerConfig::from_env();
    let filter = match cfg.filter {
        Ok(filter) => EnvFilter::new(filter),
        _ => return,
    };
    let layer = tracing_tree::HierarchicalLayer::default()
        .with_indent_lines(true)
        .with_targets(true)
        .with_writer(std::io::stderr);
    let subscribe = tracing_subscriber::Registry::default()
        .with(filter)
        .with(layer);
    if tracing::subscriber::set_global_default(subscribe).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_init_is_harmless() {
        super::init_tracing();
        super::init_tracing();
        tracing::info!("still alive");
    }
}
