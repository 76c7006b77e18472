//! Build metadata stamped by `build.rs`

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

const BUILD_NUMBER_RAW: Option<&str> = option_env!("PRODUCT_STORE_BUILD_NUMBER");

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when the crate was built without `build.rs` stamping
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: parse_build_number(BUILD_NUMBER_RAW),
            build_timestamp: option_env!("PRODUCT_STORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }
}

fn parse_build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Startup banner, written to stderr so stdout stays free for MCP traffic
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("--- {} v{} (build {}, {}) ---", info.name, info.version, info.build_number, info.build_timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_number() {
        assert_eq!(parse_build_number(Some("42")), 42);
        assert_eq!(parse_build_number(Some("4a")), 0);
        assert_eq!(parse_build_number(None), 0);
    }

    #[test]
    fn test_current_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "product-store");
        assert_eq!(info.version, VERSION);
    }
}
