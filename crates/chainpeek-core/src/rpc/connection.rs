use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use tracing::warn;

use crate::error::CoreError;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8332";

/// Connection settings for a daemon endpoint. Immutable once a client is
/// built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    pub url: String,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// `username:password` file written by the daemon, used when no explicit
    /// credentials are set.
    pub cookie_file: Option<PathBuf>,
    /// No timeout unless set; callers needing bounded latency opt in here.
    pub timeout: Option<Duration>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            pass: None,
            cookie_file: None,
            timeout: None,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.pass = Some(pass.into());
        self
    }

    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Resolve the Basic auth pair to attach to requests.
///
/// Precedence:
/// 1. explicit `user` + `pass`, both non-empty
/// 2. cookie file (`username:password`), only when neither is set
/// 3. no auth
///
/// A lone user or password disables auth entirely, cookie file included.
pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Option<(String, String)>, CoreError> {
    let user = user.filter(|u| !u.is_empty());
    let pass = pass.filter(|p| !p.is_empty());
    match (user, pass) {
        (Some(u), Some(p)) => return Ok(Some((u.to_owned(), p.to_owned()))),
        (Some(_), None) | (None, Some(_)) => {
            warn!("only one of rpc user and rpc pass is set; sending requests without auth");
            return Ok(None);
        }
        (None, None) => {}
    }

    let Some(cookie_file) = cookie_file else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(cookie_file).map_err(|e| {
        CoreError::Config(format!(
            "failed to read rpc cookie file {}: {e}",
            cookie_file.display()
        ))
    })?;
    let line = content
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| {
            CoreError::Config(format!(
                "rpc cookie file {} is empty",
                cookie_file.display()
            ))
        })?;

    let (cookie_user, cookie_pass) = line.split_once(':').ok_or_else(|| {
        CoreError::Config(format!(
            "rpc cookie file {} must contain `username:password`",
            cookie_file.display()
        ))
    })?;
    if cookie_user.is_empty() || cookie_pass.is_empty() {
        return Err(CoreError::Config(format!(
            "rpc cookie file {} must contain non-empty `username:password`",
            cookie_file.display()
        )));
    }

    Ok(Some((cookie_user.to_owned(), cookie_pass.to_owned())))
}

pub(super) fn parse_connection(connection: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::Config(format!(
            "invalid rpc url `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(connection.to_owned()),
        other => Err(CoreError::Config(format!(
            "unsupported rpc url scheme `{other}`; expected http or https"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_cookie(tag: &str, contents: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time must be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("chainpeek-cookie-{tag}-{unique}.txt"));
        fs::write(&path, contents).expect("cookie file must be writable");
        path
    }

    #[test]
    fn default_config_points_at_local_daemon() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "http://localhost:8332");
        assert!(config.user.is_none() && config.pass.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn parse_connection_http_url() {
        let parsed = parse_connection("http://127.0.0.1:8332").expect("should parse");
        assert_eq!(parsed, "http://127.0.0.1:8332");
    }

    #[test]
    fn parse_connection_invalid_scheme() {
        let err = parse_connection("ftp://example.com").expect_err("must reject ftp");
        assert!(err.to_string().contains("unsupported rpc url scheme"));
    }

    #[test]
    fn resolve_auth_accepts_user_and_pass() {
        let auth = resolve_auth(Some("alice"), Some("secret"), None).expect("auth must parse");
        assert_eq!(auth, Some(("alice".to_owned(), "secret".to_owned())));
    }

    #[test]
    fn resolve_auth_ignores_partial_credentials() {
        assert_eq!(resolve_auth(Some("user"), None, None).expect("ok"), None);
        assert_eq!(resolve_auth(None, Some("pass"), None).expect("ok"), None);
    }

    #[test]
    fn resolve_auth_treats_empty_strings_as_absent() {
        assert_eq!(resolve_auth(Some(""), Some("pass"), None).expect("ok"), None);
        assert_eq!(resolve_auth(Some("user"), Some(""), None).expect("ok"), None);
    }

    #[test]
    fn resolve_auth_reads_cookie_file() {
        let cookie_path = temp_cookie("read", "__cookie__:token\n");
        let auth = resolve_auth(None, None, Some(&cookie_path)).expect("cookie must parse");
        assert_eq!(auth, Some(("__cookie__".to_owned(), "token".to_owned())));
        let _ = fs::remove_file(cookie_path);
    }

    #[test]
    fn explicit_credentials_win_over_cookie_file() {
        let cookie_path = temp_cookie("precedence", "__cookie__:token\n");
        let auth = resolve_auth(Some("alice"), Some("secret"), Some(&cookie_path))
            .expect("auth must parse");
        assert_eq!(auth, Some(("alice".to_owned(), "secret".to_owned())));
        let _ = fs::remove_file(cookie_path);
    }

    #[test]
    fn partial_credentials_do_not_fall_back_to_cookie_file() {
        let cookie_path = temp_cookie("partial", "__cookie__:token\n");
        let cases = [
            (Some("user"), Some("")),
            (Some("user"), None),
            (None, Some("pass")),
        ];
        for (user, pass) in cases {
            let auth = resolve_auth(user, pass, Some(&cookie_path)).expect("auth must resolve");
            assert_eq!(auth, None, "user={user:?} pass={pass:?}");
        }
        let _ = fs::remove_file(cookie_path);
    }

    #[test]
    fn resolve_auth_rejects_malformed_cookie() {
        let cookie_path = temp_cookie("malformed", "no-separator\n");
        let err = resolve_auth(None, None, Some(&cookie_path)).expect_err("must reject");
        assert!(err.to_string().contains("username:password"));
        let _ = fs::remove_file(cookie_path);
    }
}
