use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Installs a compact stderr subscriber. RUST_LOG overrides the default filter.
// Returns false when a global subscriber was already set.
pub fn init_logging(verbose: bool) -> bool {
    let default_filter = if verbose {
        "hotel_reservations=debug,info"
    } else {
        "hotel_reservations=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logging(true);
        assert!(!init_logging(false));
    }
}
