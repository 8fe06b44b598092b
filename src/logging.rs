//! stderr diagnostics. stdout belongs to tmux, so nothing is ever logged there.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PULSELINE_LOG";
const DEFAULT_FILTER: &str = "warn";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

fn filter_from(value: Option<String>) -> EnvFilter {
    value
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn init_once(filter: EnvFilter, once: &OnceLock<()>) {
    let _ = once.get_or_init(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .finish();
        // Another subscriber may already be installed (tests, embedding hosts).
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init() {
    init_once(filter_from(std::env::var(LOG_ENV).ok()), &TRACING_INIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(filter: EnvFilter) -> String {
        filter.to_string().to_ascii_lowercase()
    }

    #[test]
    fn invalid_directives_fall_back_to_warn() {
        assert_eq!(shown(filter_from(Some("pulseline=loud".to_string()))), "warn");
        assert_eq!(shown(filter_from(None)), "warn");
    }

    #[test]
    fn valid_directives_are_kept() {
        assert_eq!(shown(filter_from(Some("debug".to_string()))), "debug");
    }

    #[test]
    fn init_twice_is_harmless() {
        let once = OnceLock::new();
        init_once(EnvFilter::new("warn"), &once);
        init_once(EnvFilter::new("debug"), &once);
        assert!(once.get().is_some());
    }
}
