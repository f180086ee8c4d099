use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Owns the single cancellation token shared by all in-flight requests.
///
/// `cancel_all` signals the current token and immediately installs a fresh
/// one, so requests issued afterwards are unaffected. A request still holding
/// the old token observes cancellation and resolves to the cancelled
/// sentinel; the underlying transfer is fire-and-forget, only the response is
/// ignored.
pub struct RequestLifecycle {
    current: Mutex<CancellationToken>,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Token to attach to a request issued now. Its identity decides, at
    /// response-apply time, whether the result is still wanted.
    pub fn current(&self) -> CancellationToken {
        self.current.lock().unwrap().clone()
    }

    /// Cancel everything currently pending and start a fresh generation.
    pub fn cancel_all(&self) {
        let mut current = self.current.lock().unwrap();
        current.cancel();
        *current = CancellationToken::new();
    }
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
