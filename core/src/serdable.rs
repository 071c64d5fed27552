use std::ops::Deref;

use ::glob::{Pattern, PatternError};
use ::serde::{Deserialize, Serialize};

/// `glob::Pattern` that reads from and writes to a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobPattern(Pattern);

impl GlobPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        Pattern::new(pattern).map(Self)
    }

    pub fn into_inner(self) -> Pattern {
        self.0
    }
}

impl Deref for GlobPattern {
    type Target = Pattern;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<String> for GlobPattern {
    type Error = PatternError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<GlobPattern> for String {
    fn from(p: GlobPattern) -> Self {
        p.0.as_str().to_owned()
    }
}
