use anyhow::{Result, anyhow};
use std::time::Duration;

use crate::consts::UNKNOWN_ANSWER;
use crate::oracle::Oracle;

/// Wrap a question in the one-word instructions.
pub fn build_prompt(question: &str) -> String {
    format!(
        "Answer the following question in EXACTLY ONE WORD.
Do not add punctuation.
Do not add explanation.
If unsure, still respond with one word only.

Question: {question}"
    )
}

/// Reduce a reply to one ASCII alphanumeric word.
///
/// Non-alphanumerics (whitespace included) are stripped before the first
/// whitespace-delimited token is taken, so the whole stripped reply is the
/// token.
pub fn sanitize(reply: &str) -> String {
    let stripped: String = reply
        .trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    stripped
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Ask the oracle for a one-word answer, bounded by `timeout`.
pub async fn ask(oracle: &dyn Oracle, question: &str, timeout: Duration) -> Result<String> {
    let prompt = build_prompt(question);
    let reply = tokio::time::timeout(timeout, oracle.answer(&prompt))
        .await
        .map_err(|_| anyhow!("oracle timed out after {}s", timeout.as_secs_f64()))??;

    let text = reply
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_ANSWER.to_string());
    Ok(sanitize(&text))
}
