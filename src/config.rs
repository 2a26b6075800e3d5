use std::env;

use crate::error::DermaError;

pub const DEFAULT_REPORT_WEBHOOK_URL: &str =
    "https://hook.eu2.make.com/yly5py645xmb7cskoh0br5bsavot2vkw";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_flash_model: String,
    pub gemini_temperature: f32,
    pub gemini_top_k: i32,
    pub gemini_top_p: f32,
    pub gemini_max_output_tokens: i32,
    pub gemini_request_timeout_secs: u64,
    pub report_webhook_url: String,
    pub rag_top_k: usize,
    pub default_confidence_threshold: u8,
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

fn env_i32(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_u8(name: &str, default: u8) -> u8 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u8>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from the environment. A missing GEMINI_API_KEY is
    /// a startup-class failure, not something to discover per request.
    pub fn from_env() -> Result<Self, DermaError> {
        let gemini_api_key = env_string("GEMINI_API_KEY", "");
        if gemini_api_key.trim().is_empty() {
            return Err(DermaError::Config("GEMINI_API_KEY is required".to_string()));
        }

        Ok(Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            gemini_api_key,
            gemini_model: env_string("GEMINI_MODEL", "gemini-2.5-pro"),
            gemini_flash_model: env_string("GEMINI_FLASH_MODEL", "gemini-2.5-flash"),
            gemini_temperature: env_f32("GEMINI_TEMPERATURE", 0.4),
            gemini_top_k: env_i32("GEMINI_TOP_K", 40),
            gemini_top_p: env_f32("GEMINI_TOP_P", 0.95),
            gemini_max_output_tokens: env_i32("GEMINI_MAX_OUTPUT_TOKENS", 8192),
            gemini_request_timeout_secs: env_u64("GEMINI_REQUEST_TIMEOUT_SECS", 150),
            report_webhook_url: env_string("REPORT_WEBHOOK_URL", DEFAULT_REPORT_WEBHOOK_URL),
            rag_top_k: env_usize("RAG_TOP_K", 3),
            default_confidence_threshold: env_u8("DEFAULT_CONFIDENCE_THRESHOLD", 70),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_helpers_fall_back_on_missing_or_garbage() {
        assert_eq!(env_string("DERMACHECK_TEST_MISSING", "x"), "x");
        assert_eq!(env_u64("DERMACHECK_TEST_MISSING", 150), 150);
        env::set_var("DERMACHECK_TEST_BAD_U64", "not-a-number");
        assert_eq!(env_u64("DERMACHECK_TEST_BAD_U64", 7), 7);
        env::remove_var("DERMACHECK_TEST_BAD_U64");
    }
}
