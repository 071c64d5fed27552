use std::{io, sync::Arc, time::Duration};
use tokio::sync::Mutex;

use atcrawl_webclient::{CredFieldKind, CredFieldMeta, CredMap};
use indicatif::{ProgressBar, ProgressStyle};

pub mod util {
    use dialoguer::{theme::ColorfulTheme, Input, Password};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_text(prompt: &str) -> io::Result<String> {
        Input::with_theme(&theme())
            .with_prompt(prompt)
            .interact_text()
    }

    /// Reads without echo.
    pub fn ask_password(prompt: &str) -> io::Result<String> {
        Password::with_theme(&theme())
            .with_prompt(prompt)
            .interact()
    }
}

/// Prompts for each field in order on the terminal.
pub fn ask_credential(fields: &[CredFieldMeta]) -> io::Result<CredMap> {
    let mut map = CredMap::new();

    for CredFieldMeta { name, kind } in fields {
        use CredFieldKind::*;

        let value = match kind {
            Text => util::ask_text(name),
            Password => util::ask_password(name),
        }?;

        map.insert(*name, value);
    }
    Ok(map)
}

pub fn spinner(msg: impl Into<std::borrow::Cow<'static, str>>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    ProgressBar::new_spinner().with_style(style).with_message(msg)
}

pub trait SpinnerExt {
    fn with_ticking(self) -> Arc<Mutex<Self>>;
}

impl SpinnerExt for ProgressBar {
    fn with_ticking(self) -> Arc<Mutex<Self>> {
        let mutex_spinner = Arc::new(Mutex::new(self));
        let spinner = mutex_spinner.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(80)).await;
                let spinner = spinner.lock().await;
                if spinner.is_finished() {
                    break;
                }
                spinner.tick();
            }
        });
        mutex_spinner
    }
}
