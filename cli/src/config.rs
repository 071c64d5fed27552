use std::time::Duration;

use anyhow::Context as _;
use atcrawl_core::{client::SessionOptions, Config};

use crate::{cmd::GlobalArgs, util};

/// Loads the config file and applies the global flags over it.
pub fn load(args: &GlobalArgs) -> anyhow::Result<Config> {
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(path) = &cfg.source_config_file {
        log::debug!("Loaded {}", util::replace_homedir_to_tilde(path).display());
    }

    let GlobalArgs {
        subcmd: _,
        config: _,
        cookie_file,
        interval_ms,
    } = args;

    if let Some(path) = cookie_file {
        cfg.session.cookie_file = Some(path.clone());
    }
    if let Some(ms) = interval_ms {
        cfg.session.request_interval_ms = *ms;
    }
    Ok(cfg)
}

pub fn session_options(cfg: &Config) -> anyhow::Result<SessionOptions> {
    let cookie_file = cfg
        .cookie_filepath()
        .context("Cannot determine where to store the session")?;
    let request_interval = cfg.request_interval();
    if request_interval < Duration::from_millis(100) {
        log::warn!(
            "Request interval {}ms is very short; please be gentle to the server",
            request_interval.as_millis()
        );
    }
    Ok(SessionOptions {
        cookie_file,
        request_interval,
    })
}
