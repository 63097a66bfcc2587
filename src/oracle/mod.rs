pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

/// Something that answers a text prompt. Could be Gemini or a test script.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send `prompt` and return the first candidate's text.
    ///
    /// `Ok(None)` means the service answered but the reply had no candidate
    /// text. Transport and service failures are `Err`.
    async fn answer(&self, prompt: &str) -> Result<Option<String>>;
}
