//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production / CI log collectors
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Parse a profile name as accepted by the CLI (`human`, `json`, `test`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "human" | "development" => Some(Profile::Development),
            "json" | "production" => Some(Profile::Production),
            "test" => Some(Profile::Test),
            _ => None,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup.
/// Later calls are ignored. `RUST_LOG` overrides the default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs on stderr, debug level
/// - **Production**: JSON structured logs on stderr, info level
/// - **Test**: Capture mode for test assertions
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("buildstat=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("buildstat=info")),
                )
                .init();
        }
        Profile::Test => {
            // Test capture is initialized separately via init_test_capture()
            tracing_subscriber::registry().init();
        }
    });
}
