use std::path::PathBuf;
use std::time::Duration;

/// Connection settings for [`RpcClient`](crate::rpc::RpcClient).
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Node RPC URL, e.g. `http://127.0.0.1:8332`.
    pub url: String,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Bitcoin Core `.cookie` file, used when `user`/`pass` are unset.
    pub cookie_file: Option<PathBuf>,
    pub connect_timeout: Duration,
    /// Upper bound for one request/response round trip.
    pub timeout: Duration,
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: None,
            pass: None,
            cookie_file: None,
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
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
        self.timeout = timeout;
        self
    }
}
