//! Default value functions used by serde for config deserialization.

pub fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_limit() -> u32 {
    100
}

pub fn default_timeout_secs() -> u64 {
    60
}

pub fn default_recovery_timeout_secs() -> u64 {
    10
}

pub fn default_retry_delay_ms() -> u64 {
    1000
}

pub fn default_log_level() -> String {
    "info".to_string()
}
