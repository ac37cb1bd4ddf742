use std::io::{self, Write as _};

use anyhow::Context as _;
use eigenda_signer::{
    adapter,
    config::{EigenConfig, EigenSecrets},
    types::SignResponse,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout is reserved for the single JSON response; all diagnostics go
    // to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let response = run().await;

    // The one failure that cannot be reported back to the caller: if the
    // response itself does not serialize, exit non-zero.
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &response).context("Failed to encode response")?;
    stdout
        .write_all(b"\n")
        .context("Failed to encode response")?;
    Ok(())
}

async fn run() -> SignResponse {
    let config = match EigenConfig::from_env() {
        Ok(config) => config,
        Err(err) => return SignResponse::error(format!("{err:#}")),
    };

    // The credential is checked before the request is read, so a missing key
    // is reported regardless of what arrives on stdin.
    let secrets = match EigenSecrets::from_env() {
        Ok(secrets) => secrets,
        Err(err) => return SignResponse::error(err.to_string()),
    };

    adapter::process(io::stdin().lock(), config, secrets).await
}
