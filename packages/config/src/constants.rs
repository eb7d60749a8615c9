// ABOUTME: Environment variable name constants and default values
// ABOUTME: Centralized definitions of all environment variable names used across BAAC

// Server Configuration
pub const BAAC_SERVER_URL: &str = "BAAC_SERVER_URL";
pub const BAAC_HTTP_TIMEOUT_SECS: &str = "BAAC_HTTP_TIMEOUT_SECS";

// Session Configuration
pub const BAAC_SESSION_USER: &str = "BAAC_SESSION_USER";

// Daily Reset Watch Configuration
pub const BAAC_ROLLOVER_POLL_SECS: &str = "BAAC_ROLLOVER_POLL_SECS";

// Defaults applied when the variable above is unset or invalid
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ROLLOVER_POLL_SECS: u64 = 60;
