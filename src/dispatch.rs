use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::consts::{DEFAULT_AI_TIMEOUT_SECS, FIBONACCI_CEILING};
use crate::error::BfhlError;
use crate::operations::reduce::{self, ReductionError};
use crate::operations::{Outcome, ai, fibonacci, prime};
use crate::oracle::Oracle;
use crate::request::{Operation, Request};

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Largest accepted Fibonacci term count. Never above the `u64` ceiling.
    pub max_fibonacci: u64,
    /// Bound on the oracle call.
    pub ai_timeout: Duration,
    /// Report non-integer LCM/HCF elements as invalid input (400) rather
    /// than an internal error (500).
    pub strict_reductions: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_fibonacci: FIBONACCI_CEILING,
            ai_timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
            strict_reductions: false,
        }
    }
}

/// Routes one request to one operation and normalizes the result.
pub struct Dispatcher {
    oracle: Arc<dyn Oracle>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(oracle: Arc<dyn Oracle>, config: DispatchConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Parse a raw body and run the operation it selects.
    pub async fn dispatch(&self, body: &[u8]) -> Result<Outcome, BfhlError> {
        let request = match Request::from_body(body) {
            Ok(request) => request,
            Err(e) => {
                warn!(code = e.code(), "rejected request: {}", e);
                return Err(e);
            }
        };

        let operation = request.operation();
        let result = self.run(request).await;
        match &result {
            Ok(_) => info!(%operation, "operation completed"),
            Err(BfhlError::Internal(cause)) => {
                error!(%operation, "operation failed: {:#}", cause)
            }
            Err(e) => warn!(%operation, code = e.code(), "invalid input: {}", e),
        }
        result
    }

    /// Run an already-validated request.
    pub async fn run(&self, request: Request) -> Result<Outcome, BfhlError> {
        match request {
            Request::Fibonacci(n) => {
                let limit = self.config.max_fibonacci.min(FIBONACCI_CEILING);
                if n > limit {
                    return Err(BfhlError::invalid_input(format!(
                        "Fibonacci input must not exceed {}",
                        limit
                    )));
                }
                Ok(Outcome::Sequence(fibonacci::sequence(n)))
            }
            Request::Prime(values) => {
                let primes = blocking(move || prime::filter_primes(&values)).await?;
                Ok(Outcome::Sequence(primes))
            }
            Request::Lcm(values) => blocking(move || reduce::lcm_of(&values))
                .await?
                .map(Outcome::Number)
                .map_err(|e| self.reduction_failure(Operation::Lcm, e)),
            Request::Hcf(values) => blocking(move || reduce::hcf_of(&values))
                .await?
                .map(Outcome::Number)
                .map_err(|e| self.reduction_failure(Operation::Hcf, e)),
            Request::Ai(question) => {
                let word = ai::ask(self.oracle.as_ref(), &question, self.config.ai_timeout).await?;
                Ok(Outcome::Word(word))
            }
        }
    }

    fn reduction_failure(&self, operation: Operation, err: ReductionError) -> BfhlError {
        match err {
            ReductionError::InvalidElement { .. } if self.config.strict_reductions => {
                let name = operation.key().to_uppercase();
                BfhlError::invalid_input(format!("{} input must contain only integers", name))
            }
            _ => BfhlError::Internal(anyhow::anyhow!("{} reduction failed: {}", operation, err)),
        }
    }
}

/// Run CPU-bound work off the async workers. Trial division over large
/// inputs can take seconds per element.
async fn blocking<T, F>(work: F) -> Result<T, BfhlError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| BfhlError::Internal(anyhow::anyhow!("computation task failed: {}", e)))
}
