use std::{collections::HashMap, sync::Mutex};

use ::async_trait::async_trait;
use reqwest::StatusCode;

use super::Fetch;
use crate::error::*;

/// Serves canned bodies and records every requested URL. Unknown URLs
/// answer 404.
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new<I, K, V>(pages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pages: pages
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_owned());
        self.pages.get(url).cloned().ok_or_else(|| Error::RequestFailed {
            status: StatusCode::NOT_FOUND,
            requested_url: url.to_owned(),
        })
    }
}
