use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Per-item classification logs are noisy on large catalogs, so the
/// tagging module gets its own level: quiet by default, per-rule detail
/// when verbose.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "catalog_tagger=debug,catalog_tagger::tagging=trace"
    } else {
        "catalog_tagger=info,catalog_tagger::tagging=warn"
    }
}

/// `RUST_LOG` wins over the built-in directives when set.
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .without_time()
                .compact(),
        )
        .init();
}

/// JSON 格式日誌，方便批次作業的日誌收集；保留 target 以便依模組過濾
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(build_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false),
        )
        .init();
}
