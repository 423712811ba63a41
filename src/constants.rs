//! Application constants
//!
//! Centralized location for fixed strings and configuration defaults.

/// Assistant text shown when a turn fails for any reason
pub const FALLBACK_TEXT: &str = "Sorry, something went wrong. Please try again.";

/// Text of the seeded welcome message
pub const WELCOME_TEXT: &str = "Welcome! Here is a sample data overview:";

/// Reply text returned by the mock producer
pub const MOCK_REPLY_TEXT: &str = "Here's the data analysis you requested:";

/// Default backend for the HTTP producer
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Delay between two typing frames
pub const DEFAULT_TYPING_DELAY_MS: u64 = 20;

/// Simulated latency of the mock `submit` call
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 500;

/// Simulated latency of the mock `fetch_reply` call
pub const DEFAULT_FETCH_DELAY_MS: u64 = 1500;

/// HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Log file written in the working directory
pub const DEFAULT_LOG_FILE: &str = "consult.log";

/// Environment variable pointing at an alternate config file
pub const CONFIG_ENV_VAR: &str = "CONSULT_CONFIG";

/// Application name
pub const APP_NAME: &str = "Consult AI";
