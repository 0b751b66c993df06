mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde::Serialize;

use chainpeek_core::types::BlockHeight;
use chainpeek_core::{DaemonClient, RpcConfig};

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let config = RpcConfig {
        url: args.rpc_url.clone(),
        user: args.rpc_user.clone(),
        pass: args.rpc_pass.clone(),
        cookie_file: args.rpc_cookie_file.clone(),
        timeout: args.timeout_secs.map(Duration::from_secs),
    };
    let client = DaemonClient::new(&config).context("configure RPC client")?;
    tracing::debug!(url = %config.url, "rpc client ready");

    let output = run(&client, args.command).await.map_err(|err| {
        let message = format_rpc_error(&args.rpc_url, &error_chain(&err));
        eyre!(message).wrap_err("RPC call failed")
    })?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("encode output as JSON")?
    );
    Ok(())
}

async fn run(
    client: &DaemonClient,
    command: Command,
) -> Result<serde_json::Value, chainpeek_core::CoreError> {
    match command {
        Command::BlockHash { height } => {
            to_json(client.get_block_hash(BlockHeight(height)).await?)
        }
        Command::BestBlockHash => to_json(client.get_best_block_hash().await?),
        Command::Block { hash } => to_json(client.get_block(&hash).await?),
        Command::Info => client.get_info().await,
        Command::Transaction { txid } => client.get_transaction(&txid).await,
        Command::RawTransaction { txid, hex: true } => {
            to_json(client.get_raw_transaction_hex(&txid).await?)
        }
        Command::RawTransaction { txid, hex: false } => {
            to_json(client.get_raw_transaction(&txid).await?)
        }
        Command::BlockCount => to_json(client.get_block_count().await?),
        Command::Difficulty => to_json(client.get_difficulty().await?),
        Command::RawMempool => client.get_raw_mempool().await,
        Command::Account => to_json(client.get_account().await?),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, chainpeek_core::CoreError> {
    serde_json::to_value(value).map_err(|e| {
        chainpeek_core::RpcError::InvalidResponse(format!("re-encode result: {e}")).into()
    })
}

/// Render an error with its full `source()` chain. reqwest keeps the useful
/// detail (DNS failure, refused connection) in nested sources.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn format_rpc_error(rpc_url: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("RPC endpoint `{rpc_url}`"),
        format!("RPC error: {source_error}"),
    ];

    if source_error.contains("dns error") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.contains("Connection refused")
        || source_error.contains("error sending request for url")
    {
        lines.push(
            "hint: request could not be sent; verify the daemon is running with -server and the URL is reachable"
                .into(),
        );
    } else if source_error.contains("HTTP status 401") || source_error.contains("HTTP status 403") {
        lines.push(
            "hint: authentication failed; verify --rpc-user/--rpc-pass or --rpc-cookie-file".into(),
        );
    } else if source_error.contains("transaction not found") {
        lines.push(
            "hint: confirmed transactions outside the wallet need the daemon running with -txindex=1"
                .into(),
        );
    }

    lines.join("\n")
}
