// Query execution constants (no magic values)

/// Default wall-clock deadline for auto-managed queries (30s)
pub const DEFAULT_QUERY_TIMEOUT_SECS: i64 = 30;

/// Maximum bytes of offending payload echoed inside a Malformed error
pub const PAYLOAD_SNIPPET_MAX_BYTES: usize = 200;

/// Graceful interpreter shutdown deadline before force kill (5 seconds)
pub const GRACEFUL_SHUTDOWN_TIMEOUT_MS: i64 = 5000;
