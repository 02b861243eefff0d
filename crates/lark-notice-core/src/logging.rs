use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "lark_notice=info,lark_notice_core=info,lark_notice_api=info";

pub const DEV_LOG_FILTER: &str = "lark_notice=debug,lark_notice_core=debug,lark_notice_api=debug";

/// Picks the filter directives for a run: verbose mode, then the
/// `general.log_filter` config value, then [`DEFAULT_LOG_FILTER`].
pub fn select_filter(verbose: bool, configured: Option<&str>) -> &str {
    if verbose {
        return DEV_LOG_FILTER;
    }
    match configured.map(str::trim) {
        Some(filter) if !filter.is_empty() => filter,
        _ => DEFAULT_LOG_FILTER,
    }
}

/// Builds the filter, with `RUST_LOG` taking precedence. Directives that do
/// not parse fall back to [`DEFAULT_LOG_FILTER`].
pub fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the stderr subscriber. Repeated calls are ignored.
pub fn init_with_filter(directives: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(directives))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_filter_precedence() {
        assert_eq!(select_filter(true, Some("lark_notice=warn")), DEV_LOG_FILTER);
        assert_eq!(select_filter(false, Some("lark_notice=warn")), "lark_notice=warn");
        assert_eq!(select_filter(false, Some("  ")), DEFAULT_LOG_FILTER);
        assert_eq!(select_filter(false, None), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_build_filter_accepts_config_directives() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter("lark_notice_core=trace");
        assert!(filter.to_string().contains("lark_notice_core=trace"));
    }

    #[test]
    fn test_build_filter_falls_back_on_bad_directives() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter("lark_notice=notalevel");
        assert!(filter.to_string().contains("lark_notice=info"));
    }
}
