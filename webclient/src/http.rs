use std::{sync::Arc, time::Duration};

use ::once_cell::sync::Lazy;
use ::reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use ::tokio::sync::Mutex;
use ::tokio::time::{self, Instant};
use serde::Serialize;

pub use ::reqwest::redirect;
pub use ::reqwest::{Error, IntoUrl, Request, Response};

/// Keeps consecutive requests at least `interval` apart.
///
/// A limiter is a plain value: every [`Client`] built from the same
/// `Arc<RateLimiter>` observes and advances the same clock, while clients
/// built from different limiters do not throttle each other.
/// [`RateLimiter::process_wide`] hands out the one instance shared by the
/// whole process.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

static PROCESS_WIDE: Lazy<Arc<RateLimiter>> =
    Lazy::new(|| Arc::new(RateLimiter::new(RateLimiter::DEFAULT_INTERVAL)));

impl RateLimiter {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    pub fn shared(interval: Duration) -> Arc<Self> {
        Arc::new(Self::new(interval))
    }

    pub fn process_wide() -> Arc<Self> {
        PROCESS_WIDE.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleeps until `interval` has passed since the previous turn, then
    /// records the current instant as the new previous turn.
    pub async fn wait_turn(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let next = prev + self.interval;
            if Instant::now() < next {
                log::trace!("Rate limit: sleeping {:?}", next - Instant::now());
                time::sleep_until(next).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
    limiter: Arc<RateLimiter>,
    pub cookie_store: Arc<CookieStoreMutex>,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

macro_rules! emit_request_fn {
    ($method:ident) => {
        pub fn $method(&self, u: impl IntoUrl) -> RequestBuilder {
            RequestBuilder::new(self.inner.$method(u), self.clone())
        }
    };
}

impl Client {
    pub fn new(cookies: CookieStore, limiter: Arc<RateLimiter>) -> Result<Self, Error> {
        let cookie_store = Arc::new(CookieStoreMutex::new(cookies));
        let inner = ::reqwest::Client::builder()
            .cookie_provider(cookie_store.clone())
            .redirect(redirect::Policy::limited(10))
            .gzip(true)
            .build()?;
        Ok(Self {
            inner,
            limiter,
            cookie_store,
        })
    }

    emit_request_fn!(get);
    emit_request_fn!(post);

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub(crate) async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        self.limiter.wait_turn().await;
        log::debug!("{} {}", req.method(), req.url());
        self.inner.execute(req).await
    }
}

impl RequestBuilder {
    fn new(b: ::reqwest::RequestBuilder, client: Client) -> Self {
        Self { inner: b, client }
    }

    pub async fn send(self) -> Result<Response, Error> {
        let req = self.inner.build()?;
        self.client.execute_request(req).await
    }

    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        self.inner = self.inner.form(form);
        self
    }
}
