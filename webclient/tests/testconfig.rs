use serde::Deserialize;

/// Credentials for the live-site tests, read from `ATCODER_USERNAME` and
/// `ATCODER_PASSWORD`.
#[derive(Deserialize, Debug)]
pub struct TestConfig {
    pub atcoder_username: String,
    pub atcoder_password: String,
}

impl TestConfig {
    pub fn from_env() -> Self {
        envy::from_env::<Self>()
            .expect("TestConfig::from_env(): set ATCODER_USERNAME and ATCODER_PASSWORD")
    }
}
