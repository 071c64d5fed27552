// exported modules
pub mod error;
pub mod glob_map;
pub mod http;
pub mod model;
pub mod session_store;

// site impls
pub mod atcoder;

// re-exports
pub use atcoder::{
    AuthSession, AuthState, ContestCatalog, Fetch, LangSuffixMapper, SubmissionCollector,
    SubmissionQuery,
};
pub use error::*;
pub use http::RateLimiter;
pub use model::*;
pub use session_store::SessionStore;

// internal modules
mod util;
