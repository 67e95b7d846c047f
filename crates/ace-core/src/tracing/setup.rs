//! Subscriber initialization driven by `ACE_LOG`.

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `ACE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "ace=info";

/// Install the global subscriber. Safe to call more than once.
///
/// `ACE_LOG` takes standard `EnvFilter` directives, e.g.
/// `ACE_LOG=ace_analysis::enforcement=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("ACE_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
