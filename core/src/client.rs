use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use atcrawl_webclient::{AuthSession, RateLimiter, SessionStore};

use crate::interactive::ask_credential;

/// Where the session is stored and how fast it may crawl.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub cookie_file: PathBuf,
    pub request_interval: Duration,
}

impl SessionOptions {
    pub fn store(&self) -> SessionStore {
        SessionStore::new(&self.cookie_file)
    }

    /// The process-wide limiter for the default interval, a private one
    /// otherwise.
    pub fn limiter(&self) -> Arc<RateLimiter> {
        if self.request_interval == RateLimiter::DEFAULT_INTERVAL {
            RateLimiter::process_wide()
        } else {
            RateLimiter::shared(self.request_interval)
        }
    }
}

/// Restores the stored session, prompting for credentials on the terminal
/// when there is none.
pub async fn open_session(opts: &SessionOptions) -> anyhow::Result<AuthSession> {
    AuthSession::establish(opts.store(), opts.limiter(), ask_credential)
        .await
        .with_context(|| {
            format!(
                "Failed to establish an AtCoder session (cookie file: {})",
                opts.cookie_file.display()
            )
        })
}
