use std::fmt;
use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// HTTP basic-auth credentials for the node.
#[derive(Clone, PartialEq, Eq)]
pub struct Auth {
    pub user: String,
    pub pass: String,
}

impl Auth {
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Resolve credentials.
///
/// Precedence:
/// 1. explicit `user` + `pass`
/// 2. cookie file (`username:password`) from `cookie_file`
/// 3. no auth
pub(crate) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Option<Auth>, CoreError> {
    match (user, pass) {
        (Some(u), Some(p)) => return Ok(Some(Auth::new(u, p))),
        (Some(_), None) | (None, Some(_)) => {
            return Err(CoreError::Config(
                "both rpc user and rpc pass must be set together".to_owned(),
            ));
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

    Ok(Some(Auth::new(cookie_user, cookie_pass)))
}

/// Validate the node URL and parse it into the base endpoint.
pub(crate) fn parse_connection(connection: &str) -> Result<Url, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::Config(format!(
            "invalid connection `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CoreError::Config(format!(
            "unsupported connection scheme `{other}`; expected http or https"
        ))),
    }
}

/// Endpoint for a call: the base URL for the default context, or the
/// per-wallet route `base/wallet/<name>` for a non-empty wallet scope.
///
/// The wallet name is percent-encoded as one path segment; the node decodes
/// it back, so names with `/`, `#`, `?` or `%` reach the right wallet.
pub(crate) fn wallet_endpoint(base: &Url, wallet: &str) -> String {
    if wallet.is_empty() {
        return base.as_str().trim_end_matches('/').to_owned();
    }
    let mut url = base.clone();
    // http(s) URLs always have a hierarchical path.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("wallet").push(wallet);
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_cookie(tag: &str, content: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time must be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("btcrpc-core-cookie-{tag}-{unique}.txt"));
        fs::write(&path, content).expect("cookie file must be writable");
        path
    }

    fn base(url: &str) -> Url {
        parse_connection(url).expect("base url must parse")
    }

    #[test]
    fn parse_connection_http_url() {
        let parsed = parse_connection("http://127.0.0.1:8332").expect("should parse");
        assert_eq!(wallet_endpoint(&parsed, ""), "http://127.0.0.1:8332");
    }

    #[test]
    fn parse_connection_strips_trailing_slash() {
        let parsed = parse_connection("http://127.0.0.1:18443/").expect("should parse");
        assert_eq!(wallet_endpoint(&parsed, ""), "http://127.0.0.1:18443");
        assert_eq!(
            wallet_endpoint(&parsed, "alice"),
            "http://127.0.0.1:18443/wallet/alice"
        );
    }

    #[test]
    fn parse_connection_invalid_scheme() {
        let err = parse_connection("ftp://example.com").expect_err("must reject ftp");
        assert!(err.to_string().contains("unsupported connection scheme"));
    }

    #[test]
    fn parse_connection_rejects_garbage() {
        let err = parse_connection("not a url").expect_err("must reject");
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn wallet_endpoint_default_is_base() {
        assert_eq!(
            wallet_endpoint(&base("http://127.0.0.1:8332"), ""),
            "http://127.0.0.1:8332"
        );
    }

    #[test]
    fn wallet_endpoint_appends_wallet_route() {
        for name in ["alice", "bob_wallet", "cold-storage"] {
            assert_eq!(
                wallet_endpoint(&base("http://127.0.0.1:8332"), name),
                format!("http://127.0.0.1:8332/wallet/{name}")
            );
        }
    }

    #[test]
    fn wallet_endpoint_keeps_base_path() {
        assert_eq!(
            wallet_endpoint(&base("https://node.example/bitcoin/"), "alice"),
            "https://node.example/bitcoin/wallet/alice"
        );
    }

    #[test]
    fn wallet_endpoint_encodes_reserved_characters() {
        let base = base("http://127.0.0.1:8332");
        assert_eq!(
            wallet_endpoint(&base, "cold#2"),
            "http://127.0.0.1:8332/wallet/cold%232"
        );
        assert_eq!(
            wallet_endpoint(&base, "a/b?c%d"),
            "http://127.0.0.1:8332/wallet/a%2Fb%3Fc%25d"
        );
        assert_eq!(
            wallet_endpoint(&base, "my wallet"),
            "http://127.0.0.1:8332/wallet/my%20wallet"
        );

        let parsed = Url::parse(&wallet_endpoint(&base, "cold#2")).expect("endpoint must parse");
        assert_eq!(parsed.fragment(), None);
        assert_eq!(parsed.path(), "/wallet/cold%232");
    }

    #[test]
    fn resolve_auth_rejects_partial_credentials() {
        let err = resolve_auth(Some("user"), None, None).expect_err("must reject partial auth");
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn resolve_auth_accepts_user_and_pass() {
        let auth = resolve_auth(Some("alice"), Some("secret"), None).expect("auth must parse");
        assert_eq!(auth, Some(Auth::new("alice", "secret")));
    }

    #[test]
    fn resolve_auth_none_without_inputs() {
        assert_eq!(resolve_auth(None, None, None).expect("no auth is fine"), None);
    }

    #[test]
    fn resolve_auth_reads_cookie_file() {
        let cookie_path = temp_cookie("valid", "__cookie__:token\n");
        let auth = resolve_auth(None, None, Some(&cookie_path)).expect("cookie must parse");
        assert_eq!(auth, Some(Auth::new("__cookie__", "token")));
        let _ = fs::remove_file(cookie_path);
    }

    #[test]
    fn resolve_auth_rejects_malformed_cookie() {
        let cookie_path = temp_cookie("malformed", "no-separator\n");
        let err = resolve_auth(None, None, Some(&cookie_path)).expect_err("must reject");
        assert!(err.to_string().contains("username:password"));
        let _ = fs::remove_file(cookie_path);
    }

    #[test]
    fn auth_debug_redacts_password() {
        let rendered = format!("{:?}", Auth::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
