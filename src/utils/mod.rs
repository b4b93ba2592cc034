pub mod build_info;
pub mod persistence;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "form_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVE);
}

/// Same as [`init_tracing`] with a caller-provided default directive, typically
/// `Config::log_filter`. `RUST_LOG` still takes precedence.
pub fn init_tracing_with(directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = directive
            .parse::<Directive>()
            .or_else(|_| DEFAULT_DIRECTIVE.parse::<Directive>());
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = directive {
            filter = filter.add_directive(directive);
        }

        // A host may already own the global subscriber; keep theirs.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
