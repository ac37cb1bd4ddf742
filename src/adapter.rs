//! Maps decoded requests onto disperser operations.

use std::{io, time::Duration};

use tokio::time::timeout;

use crate::{
    client::{Disperser, EigenClient},
    config::{EigenConfig, EigenSecrets},
    types::{SignRequest, SignResponse},
};

/// Decodes exactly one JSON request from `input` and executes it against the
/// real disperser client. Credentials and configuration are passed in
/// explicitly; the only environment access happens in `main`.
pub async fn process(
    input: impl io::Read,
    config: EigenConfig,
    secrets: EigenSecrets,
) -> SignResponse {
    let request: SignRequest = match serde_json::from_reader(input) {
        Ok(request) => request,
        Err(err) => return SignResponse::error(format!("Failed to decode request: {err}")),
    };

    let client = EigenClient::new(config.clone(), secrets);
    Adapter::new(&client, &config).handle(request).await
}

/// Dispatches a single request against an injected [`Disperser`]. Every
/// failure collapses into a flat `{success:false, error}` response; nothing
/// is retried.
#[derive(Debug)]
pub struct Adapter<'a> {
    client: &'a dyn Disperser,
    dispatch_timeout: Duration,
    status_timeout: Duration,
}

impl<'a> Adapter<'a> {
    pub fn new(client: &'a dyn Disperser, config: &EigenConfig) -> Self {
        Self {
            client,
            dispatch_timeout: config.dispatch_timeout(),
            status_timeout: config.status_timeout(),
        }
    }

    pub async fn handle(&self, request: SignRequest) -> SignResponse {
        match request.action.as_str() {
            "disperse_blob" => self.disperse_blob(&request.data).await,
            "get_blob_status" => self.get_blob_status(&request.data).await,
            other => SignResponse::error(format!("Unknown action: {other}")),
        }
    }

    async fn disperse_blob(&self, data: &str) -> SignResponse {
        let data = match hex::decode(data) {
            Ok(data) => data,
            Err(err) => return SignResponse::error(format!("Failed to decode data: {err}")),
        };

        match timeout(self.dispatch_timeout, self.client.disperse_blob(data)).await {
            Err(_) => SignResponse::error("Failed to disperse blob: deadline exceeded"),
            Ok(Err(err)) => SignResponse::error(format!("Failed to disperse blob: {err:#}")),
            Ok(Ok(blob_key)) => {
                tracing::info!("Blob dispersed, blob key: {blob_key}");
                SignResponse::with_blob_key(blob_key)
            }
        }
    }

    async fn get_blob_status(&self, data: &str) -> SignResponse {
        let bytes = match hex::decode(data) {
            Ok(bytes) => bytes,
            Err(err) => return SignResponse::error(format!("Failed to decode blob key: {err}")),
        };

        // Raw byte copy into the fixed-size key: short input is zero-padded,
        // long input is truncated. Length is intentionally not validated.
        let mut blob_key = [0u8; 32];
        let len = bytes.len().min(blob_key.len());
        blob_key[..len].copy_from_slice(&bytes[..len]);

        match timeout(self.status_timeout, self.client.blob_status(blob_key)).await {
            Err(_) => SignResponse::error("Failed to get blob status: deadline exceeded"),
            Ok(Err(err)) => SignResponse::error(format!("Failed to get blob status: {err:#}")),
            Ok(Ok(status)) => {
                // Status details are diagnostic output only; the caller gets
                // a bare success.
                tracing::info!("Blob status: {status}");
                SignResponse::success()
            }
        }
    }
}
