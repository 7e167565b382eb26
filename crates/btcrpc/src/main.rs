mod cli;

use std::time::Duration;

use bitcoin::Network;
use clap::Parser;
use eyre::{eyre, WrapErr};

use btcrpc_core::types::RawMempool;
use btcrpc_core::{CoreError, ErrorKind, RpcClient, RpcConfig};

use cli::{parse_param, Cli, Command};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let mut config =
        RpcConfig::new(&args.rpc_url).with_timeout(Duration::from_secs(args.timeout_secs));
    config.user = args.rpc_user.clone();
    config.pass = args.rpc_pass.clone();
    config.cookie_file = args.rpc_cookie_file.clone();

    let rpc = RpcClient::new(&config).context("build RPC client")?;
    let wallet = args.wallet.as_deref().unwrap_or("");
    let connect_error = |err: CoreError| rpc_error_report(&args.rpc_url, err);

    match args.command {
        Command::Call { method, params } => {
            let params = params.iter().map(|p| parse_param(p)).collect();
            let result = rpc
                .call(&method, params, wallet)
                .await
                .map_err(connect_error)?;
            println!("{}", result.get());
        }

        Command::Info => {
            let chain = rpc.get_blockchain_info().await.map_err(connect_error)?;
            let mempool = rpc.get_mempool_info().await.map_err(connect_error)?;
            tracing::debug!(chain = %chain.chain, blocks = chain.blocks, "fetched chain info");
            if chain.pruned {
                tracing::warn!("node is pruned; old blocks and transactions may be unavailable");
            }

            println!("network:     {}", map_chain_to_network(&chain.chain)?);
            println!("blocks:      {}", chain.blocks);
            println!("headers:     {}", chain.headers);
            println!("best block:  {}", chain.best_block_hash);
            println!("ibd:         {}", chain.initial_block_download);
            println!("mempool txs: {}", mempool.size);
            println!("mempool min: {}", mempool.mempool_min_fee);
        }

        Command::Balance => {
            if wallet.is_empty() {
                return Err(eyre!("`balance` needs a wallet; pass --wallet <name>"));
            }
            let balance = rpc
                .wallet(wallet)
                .get_balance(None, None)
                .await
                .map_err(connect_error)?;
            println!("{balance}");
        }

        Command::Mempool { verbose } => {
            let mempool = rpc
                .get_raw_mempool(verbose, false)
                .await
                .map_err(connect_error)?;
            match mempool {
                RawMempool::Txids(txids) | RawMempool::Sequence { txids, .. } => {
                    for txid in txids {
                        println!("{txid}");
                    }
                }
                RawMempool::Verbose(entries) => {
                    for (txid, entry) in entries {
                        println!(
                            "{txid} vsize={} fee={} ancestors={}",
                            entry.vsize, entry.fees.base, entry.ancestor_count
                        );
                    }
                }
            }
        }

        Command::Wallets => {
            for name in rpc.list_wallets().await.map_err(connect_error)? {
                println!("{name}");
            }
        }
    }

    Ok(())
}

/// Transport failures get connection hints; node and decode errors are
/// reported as they are.
fn rpc_error_report(rpc_url: &str, err: CoreError) -> eyre::Report {
    if err.kind() != ErrorKind::Transport {
        return eyre::Report::new(err);
    }
    let message = format_rpc_connect_error(rpc_url, &error_chain(&err));
    eyre!(message).wrap_err("while calling Bitcoin Core RPC")
}

/// `err` and its sources joined with `: `; reqwest keeps the OS-level cause
/// (e.g. "Connection refused") a few levels down.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn format_rpc_connect_error(rpc_url: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("could not reach RPC endpoint `{rpc_url}`"),
        format!("RPC error: {source_error}"),
    ];

    if source_error.contains("dns error") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("Connection refused") {
        lines.push(
            "hint: nothing is listening there; check that bitcoind runs with -server and the RPC port"
                .into(),
        );
    } else if source_error.contains("certificate") || source_error.contains("tls") {
        lines.push(
            "hint: TLS handshake failed; verify certificate trust and that the endpoint uses HTTPS"
                .into(),
        );
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push(
            "hint: authentication failed; verify --rpc-user/--rpc-pass or --rpc-cookie-file".into(),
        );
    } else if source_error.contains("404") {
        lines.push(
            "hint: endpoint path is invalid; check the wallet name (is it loaded?) and the URL"
                .into(),
        );
    } else if source_error.contains("timed out") {
        lines.push("hint: the node did not answer in time; raise --timeout-secs".into());
    }

    lines.join("\n")
}

fn map_chain_to_network(chain: &str) -> eyre::Result<Network> {
    match chain {
        "main" => Ok(Network::Bitcoin),
        "test" => Ok(Network::Testnet),
        "testnet4" => Ok(Network::Testnet4),
        "signet" => Ok(Network::Signet),
        "regtest" => Ok(Network::Regtest),
        _ => Err(eyre!(
            "unrecognized chain name `{chain}` from getblockchaininfo"
        )),
    }
}
