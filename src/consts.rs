//! Project-wide constants.

/// Identity placed in every envelope when none is configured.
pub const DEFAULT_IDENTITY: &str = "bfhl@example.com";

/// Default Gemini model when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default bound on the outbound AI call, in seconds.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Longest Fibonacci sequence whose terms all fit in a `u64`.
pub const FIBONACCI_CEILING: u64 = 94;

/// Answer used when the AI service returns no candidate text.
pub const UNKNOWN_ANSWER: &str = "Unknown";

/// Generic message for every internal failure. Causes are logged, not returned.
pub const INTERNAL_ERROR_MESSAGE: &str = "There is problem in server";
