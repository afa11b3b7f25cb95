//! Authorization Configuration
//!
//! Loads configuration from environment variables.

use std::env;

/// Authorization core configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Page size used when a listing gives a page but no size (default: 100)
    pub default_page_size: usize,

    /// Compare-and-swap attempts for a descriptor write (default: 5)
    pub write_attempts: u32,

    /// Identity-provider role marking platform super-admins (default: "Platform.Admin")
    pub platform_admin_role: String,

    /// Tracing filter used when `RUST_LOG` is not set (default: "platform_rbac=info")
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: 100,
            write_attempts: 5,
            platform_admin_role: "Platform.Admin".into(),
            log_filter: "platform_rbac=info".into(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RBAC_DEFAULT_PAGE_SIZE`: page size when only a page is given
    /// - `RBAC_WRITE_ATTEMPTS`: descriptor write attempts before giving up
    /// - `RBAC_PLATFORM_ADMIN_ROLE`: role name of platform super-admins
    /// - `RBAC_LOG_FILTER`: default tracing filter
    ///
    /// Unparseable or zero numeric values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            default_page_size: env::var("RBAC_DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.default_page_size),
            write_attempts: env::var("RBAC_WRITE_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.write_attempts),
            platform_admin_role: env::var("RBAC_PLATFORM_ADMIN_ROLE")
                .unwrap_or(defaults.platform_admin_role),
            log_filter: env::var("RBAC_LOG_FILTER").unwrap_or(defaults.log_filter),
        }
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            default_page_size: 10,
            write_attempts: 3,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "RBAC_DEFAULT_PAGE_SIZE",
        "RBAC_WRITE_ATTEMPTS",
        "RBAC_PLATFORM_ADMIN_ROLE",
        "RBAC_LOG_FILTER",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.default_page_size, 100);
        assert_eq!(config.write_attempts, 5);
        assert_eq!(config.platform_admin_role, "Platform.Admin");
        assert_eq!(config.log_filter, "platform_rbac=info");
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        clear_env();
        env::set_var("RBAC_DEFAULT_PAGE_SIZE", "25");
        env::set_var("RBAC_WRITE_ATTEMPTS", "9");
        env::set_var("RBAC_PLATFORM_ADMIN_ROLE", "Root");
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.write_attempts, 9);
        assert_eq!(config.platform_admin_role, "Root");
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back() {
        clear_env();
        env::set_var("RBAC_DEFAULT_PAGE_SIZE", "0");
        env::set_var("RBAC_WRITE_ATTEMPTS", "many");
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.default_page_size, 100);
        assert_eq!(config.write_attempts, 5);
    }
}
