//! Boundary to the EigenDA disperser network.
//!
//! The adapter only talks to [`Disperser`], so its dispatch logic is
//! testable without network access; [`EigenClient`] is the real
//! implementation on top of the EigenDA v2 client SDK, which performs
//! request signing, payload encoding and gRPC transport internally.

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use rust_eigenda_signers::signers::private_key::Signer;
use rust_eigenda_v2_client::{
    core::BlobKey,
    payload_disperser::{PayloadDisperser, PayloadDisperserConfig},
    utils::SecretUrl,
};
use rust_eigenda_v2_common::{Payload, PayloadForm};
use secrecy::ExposeSecret as _;
use url::Url;

use crate::config::{EigenConfig, EigenSecrets, PolynomialForm};

/// Outcome of a status lookup, summarized for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobDispersalStatus {
    /// The disperser has not produced a certificate for the blob yet.
    Pending,
    /// Dispersal finished and a certificate is available.
    Complete,
}

impl fmt::Display for BlobDispersalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

#[async_trait]
pub trait Disperser: fmt::Debug + Send + Sync {
    /// Submits a payload for dispersal and returns the hex-encoded blob key.
    async fn disperse_blob(&self, data: Vec<u8>) -> anyhow::Result<String>;

    /// Queries the dispersal status of a previously submitted blob.
    async fn blob_status(&self, blob_key: [u8; 32]) -> anyhow::Result<BlobDispersalStatus>;
}

#[derive(Debug, Clone)]
pub struct EigenClient {
    config: EigenConfig,
    secrets: EigenSecrets,
}

impl EigenClient {
    pub fn new(config: EigenConfig, secrets: EigenSecrets) -> Self {
        Self { config, secrets }
    }

    /// Builds a fresh SDK client. The adapter serves a single request per
    /// process, so there is nothing to gain from caching the connection.
    async fn connect(&self) -> anyhow::Result<PayloadDisperser<Signer>> {
        let url = Url::from_str(&self.config.eigenda_eth_rpc)
            .map_err(|_| anyhow::anyhow!("Invalid eth rpc url"))?;

        let payload_form = match self.config.polynomial_form {
            PolynomialForm::Coeff => PayloadForm::Coeff,
            PolynomialForm::Eval => PayloadForm::Eval,
        };

        let payload_disperser_config = PayloadDisperserConfig {
            polynomial_form: payload_form,
            blob_version: self.config.blob_version,
            cert_verifier_router_address: self.config.cert_verifier_addr.clone(),
            eth_rpc_url: SecretUrl::new(url),
            disperser_rpc: self.config.disperser_rpc.clone(),
            use_secure_grpc_flag: self.config.authenticated,
        };

        let private_key = self
            .secrets
            .private_key
            .0
            .expose_secret()
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse private key: {}", e))?;
        let signer = Signer::new(private_key);

        PayloadDisperser::new(payload_disperser_config, signer)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create disperser client: {:?}", e))
    }
}

#[async_trait]
impl Disperser for EigenClient {
    async fn disperse_blob(&self, data: Vec<u8>) -> anyhow::Result<String> {
        let client = self.connect().await?;
        let payload = Payload::new(data);
        let blob_key = client
            .send_payload(payload)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to disperse blob: {:?}", e))?;
        Ok(blob_key.to_hex())
    }

    async fn blob_status(&self, blob_key: [u8; 32]) -> anyhow::Result<BlobDispersalStatus> {
        let client = self.connect().await?;
        let blob_key = BlobKey::from_bytes(blob_key);
        let cert = client
            .get_cert(&blob_key)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get blob status: {:?}", e))?;
        Ok(if cert.is_some() {
            BlobDispersalStatus::Complete
        } else {
            BlobDispersalStatus::Pending
        })
    }
}
