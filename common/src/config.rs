use std::time::Duration;

/// Interval between repeated requests for one still-unanswered candidate.
pub const REQUEST_INTERVAL: Duration = Duration::from_millis(200);

/// Upper bound on concurrently active per-target resolvers.
pub const MAX_CONCURRENCY: usize = 1000;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Tuning knobs for a single scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Overall deadline for the scan.
    ///
    /// Also bounds how long each individual candidate is waited on, so a
    /// candidate admitted late never extends the scan past this window.
    pub timeout: Duration,

    /// Delay between retransmissions toward an unanswered candidate.
    pub request_interval: Duration,

    /// How many resolvers may hold an admission slot at the same time.
    pub max_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            request_interval: REQUEST_INTERVAL,
            max_concurrency: MAX_CONCURRENCY,
        }
    }
}

impl ScanConfig {
    /// Default configuration with a caller-chosen overall deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}
