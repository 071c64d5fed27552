pub const DOMAIN: &str = "atcoder.jp";
pub const ORIGIN: &str = "https://atcoder.jp";
pub const LOGIN_URL: &str = "https://atcoder.jp/login";
/// Site root, pinned to the English UI so that markup markers stay stable.
pub const TOP_URL: &str = "https://atcoder.jp/?lang=en";

/// e.g. "https://atcoder.jp/contests/abc334"
pub fn contest_url(contest: &str) -> String {
    format!("{}/contests/{}", ORIGIN, contest)
}

pub fn tasks_url(contest: &str) -> String {
    format!("{}/tasks", contest_url(contest))
}

pub fn submissions_url(contest: &str) -> String {
    format!("{}/submissions", contest_url(contest))
}

pub fn submission_url(contest: &str, id: &str) -> String {
    format!("{}/{}", submissions_url(contest), id)
}

/// Completes a site-absolute path ("/contests/...") into a full URL.
pub fn absolute(path: &str) -> String {
    if path.starts_with("https://") {
        path.to_owned()
    } else {
        format!("{}{}", ORIGIN, path)
    }
}
