//! Process configuration, resolved once at startup.
//!
//! Values arrive from the command line or the environment (see `main.rs`);
//! this module validates them and hands each component its slice.

use anyhow::{Result, bail};
use std::time::Duration;

use crate::consts::{
    DEFAULT_AI_TIMEOUT_SECS, DEFAULT_GEMINI_BASE_URL, DEFAULT_IDENTITY, DEFAULT_MODEL,
    DEFAULT_PORT, FIBONACCI_CEILING,
};
use crate::dispatch::DispatchConfig;
use crate::oracle::gemini::GeminiConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub identity: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout_secs: u64,
    pub max_fibonacci: u64,
    pub strict_reductions: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            identity: DEFAULT_IDENTITY.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            ai_timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
            max_fibonacci: FIBONACCI_CEILING,
            strict_reductions: false,
        }
    }
}

impl ServerConfig {
    /// Check invariants and normalize. Blank API keys count as absent and
    /// the Fibonacci limit is clamped to what fits in a `u64`.
    pub fn validated(mut self) -> Result<Self> {
        if self.identity.trim().is_empty() {
            bail!("identity must not be empty");
        }
        if self.ai_timeout_secs == 0 {
            bail!("AI timeout must be at least one second");
        }
        if self.gemini_model.trim().is_empty() {
            bail!("Gemini model must not be empty");
        }
        self.gemini_api_key = self
            .gemini_api_key
            .filter(|key| !key.trim().is_empty());
        self.max_fibonacci = self.max_fibonacci.min(FIBONACCI_CEILING);
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn dispatch(&self) -> DispatchConfig {
        DispatchConfig {
            max_fibonacci: self.max_fibonacci,
            ai_timeout: self.ai_timeout(),
            strict_reductions: self.strict_reductions,
        }
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: self.ai_timeout(),
        }
    }
}
