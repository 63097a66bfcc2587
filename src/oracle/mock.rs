use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Oracle;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Candidate text.
    Text(String),
    /// A reply with no candidate text.
    Missing,
    /// The call fails with this message.
    Fail(String),
    /// The call sleeps this long, then answers "late".
    Stall(Duration),
}

/// A scripted oracle for tests. Returns pre-defined replies in order and
/// records every prompt it receives.
pub struct MockOracle {
    replies: Vec<MockReply>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockOracle {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// An oracle that answers `text` once.
    pub fn text(text: &str) -> Self {
        Self::new(vec![MockReply::Text(text.to_string())])
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn answer(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockOracle: no more replies (called {} times)", i + 1))?;
        match reply {
            MockReply::Text(text) => Ok(Some(text)),
            MockReply::Missing => Ok(None),
            MockReply::Fail(message) => bail!(message),
            MockReply::Stall(delay) => {
                tokio::time::sleep(delay).await;
                Ok(Some("late".to_string()))
            }
        }
    }
}
