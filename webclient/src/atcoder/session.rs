use std::{io, sync::Arc};

use ::async_trait::async_trait;
use ::reqwest_cookie_store::CookieStore;
use ::strum::Display;

use super::{urls::*, Fetch};
use crate::{
    error::*,
    http::{Client, RateLimiter},
    model::*,
    session_store::SessionStore,
    util,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    /// Terminal on success.
    Authenticated,
    /// Terminal on failure.
    Failed,
}

/// Authenticated HTTP context. Every request goes through the rate limiter
/// the session was built with.
pub struct AuthSession {
    http: Client,
    store: SessionStore,
    state: AuthState,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("store", &self.store)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    pub const CREDENTIAL_FIELDS: &'static [CredFieldMeta] = &[
        CredFieldMeta {
            name: "username",
            kind: CredFieldKind::Text,
        },
        CredFieldMeta {
            name: "password",
            kind: CredFieldKind::Password,
        },
    ];

    /// Text only rendered for a signed-in user.
    pub const LOGIN_MARKER: &'static str = "My Profile";

    /// Restores the stored cookies, or logs in with credentials from
    /// `ask_credential` and stores the new cookies. The result is verified
    /// against the site root either way; on failure the stored cookies are
    /// removed and [`Error::LoginFailed`] is returned.
    pub async fn establish<F>(
        store: SessionStore,
        limiter: Arc<RateLimiter>,
        ask_credential: F,
    ) -> Result<Self>
    where
        F: FnOnce(&'static [CredFieldMeta]) -> io::Result<CredMap>,
    {
        let restored = match store.load() {
            Ok(cookies) => Some(cookies),
            Err(Error::CookieNotFound(path)) => {
                log::debug!("No session at {}", path.display());
                None
            }
            Err(e @ Error::MalformedSessionFile { .. }) => {
                log::warn!("{}; discarding it", e);
                store.delete()?;
                None
            }
            Err(e) => return Err(e),
        };

        let fresh_login = restored.is_none();
        let mut session = Self {
            http: Client::new(restored.unwrap_or_default(), limiter)?,
            store,
            state: AuthState::Unauthenticated,
        };

        if fresh_login {
            session.set_state(AuthState::Authenticating);
            let cred = ask_credential(Self::CREDENTIAL_FIELDS).map_err(Error::Prompt)?;
            if let Err(e) = session.login(cred).await {
                session.set_state(AuthState::Failed);
                return Err(e);
            }
            session.save()?;
        }

        if session.is_logged_in().await? {
            session.set_state(AuthState::Authenticated);
            Ok(session)
        } else {
            session.set_state(AuthState::Failed);
            session.store.delete()?;
            Err(Error::LoginFailed)
        }
    }

    /// Submits the login form with `cred` plus the page's CSRF token.
    pub async fn login(&mut self, cred: CredMap) -> Result<()> {
        let page = self.fetch(LOGIN_URL).await?;
        let csrf_token = util::find_form_input_value(&page, "csrf_token").ok_or_else(|| {
            Error::NoLoginForm {
                requested_url: LOGIN_URL.to_owned(),
            }
        })?;

        let mut params = cred;
        params.insert("csrf_token", csrf_token);
        let resp = self.http.post(LOGIN_URL).form(&params).send().await?;
        util::ensure_success(resp, LOGIN_URL)?;
        Ok(())
    }

    /// Fetches the site root and looks for [`Self::LOGIN_MARKER`].
    /// Each call counts against the rate limit.
    pub async fn is_logged_in(&self) -> Result<bool> {
        let body = self.fetch(TOP_URL).await?;
        Ok(body.contains(Self::LOGIN_MARKER))
    }

    /// GET `url` and return the body; any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let url = util::parse_url(url)?;
        let requested_url = url.to_string();
        let resp = self.http.get(url).send().await?;
        let resp = util::ensure_success(resp, requested_url)?;
        Ok(resp.text().await?)
    }

    /// Writes the current cookie set to the session file.
    pub fn save(&self) -> Result<()> {
        let cookies = self.cookies();
        self.store.save(&cookies)
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    fn cookies(&self) -> CookieStore {
        let guard = match self.http.cookie_store.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    }

    fn set_state(&mut self, next: AuthState) {
        log::debug!("Auth state: {} -> {}", self.state, next);
        self.state = next;
    }
}

#[async_trait]
impl Fetch for AuthSession {
    async fn fetch(&self, url: &str) -> Result<String> {
        AuthSession::fetch(self, url).await
    }
}
