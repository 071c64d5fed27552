use reqwest::{Response, StatusCode};
use scraper::{Html, Selector};
use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Fails with [`Error::RequestFailed`] unless the final response status is 2xx.
pub fn ensure_success(resp: Response, requested_url: impl Into<String>) -> Result<Response> {
    let status: StatusCode = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::RequestFailed {
            status,
            requested_url: requested_url.into(),
        })
    }
}

/// Value of the first `<input name="{name}">` inside a `<form>`.
pub fn find_form_input_value(html: &str, name: &str) -> Option<String> {
    let sel = Selector::parse(&format!("form input[name='{}']", name)).ok()?;
    let doc = Html::parse_document(html);
    let el = doc.select(&sel).next()?;
    el.value().attr("value").map(str::to_owned)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_url() {
        let url = parse_url("https://atcoder.jp/login").unwrap();
        assert_eq!(url.host_str(), Some("atcoder.jp"));

        let err = parse_url("/login").unwrap_err();
        assert!(matches!(err, Error::InvalidSyntaxUrl { .. }));
    }

    #[test]
    fn test_find_form_input_value() {
        let html = r#"<html><body><div id="main-container">
<form action="" method="POST">
    <input type="hidden" name="csrf_token" value="abc+/=="/>
    <input type="text" name="username" value=""/>
</form></div></body></html>"#;
        assert_eq!(
            find_form_input_value(html, "csrf_token").as_deref(),
            Some("abc+/==")
        );
        assert_eq!(find_form_input_value(html, "missing"), None);
        assert_eq!(find_form_input_value("<p>no form</p>", "csrf_token"), None);
    }
}
