use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Drive a Bitcoin Core node over JSON-RPC.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Bitcoin Core RPC URL.
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:8332",
        env = "BTCRPC_RPC_URL"
    )]
    pub rpc_url: String,

    /// RPC username.
    #[arg(long, global = true, env = "BTCRPC_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password.
    #[arg(long, global = true, env = "BTCRPC_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Bitcoin Core `.cookie` file, used when no user/password is given.
    #[arg(long, global = true, env = "BTCRPC_RPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Upper bound for one request/response round trip, in seconds.
    #[arg(long, global = true, default_value = "30")]
    pub timeout_secs: u64,

    /// Route wallet RPCs to `/wallet/<name>`.
    #[arg(long, global = true, env = "BTCRPC_WALLET")]
    pub wallet: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Send any RPC method and print the raw result.
    Call {
        method: String,
        /// Positional parameters. Each is parsed as JSON, or sent as a
        /// string when it is not valid JSON.
        #[arg(allow_negative_numbers = true)]
        params: Vec<String>,
    },

    /// Chain tip and mempool summary.
    Info,

    /// Wallet balance (requires --wallet).
    Balance,

    /// Transactions currently in the mempool.
    Mempool {
        /// Print full entries instead of txids.
        #[arg(long)]
        verbose: bool,
    },

    /// Wallets loaded on the node.
    Wallets,
}

/// Parse one command-line parameter: JSON when it parses, otherwise the raw
/// text as a JSON string (so addresses and hex need no quoting).
pub fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}
