mod credential;
mod sample;
mod submission;
mod task;

pub use credential::*;
pub use sample::*;
pub use submission::*;
pub use task::*;

pub use reqwest::Url;
