//! Configuration for the EigenDA disperser connection.
//!
//! Every knob defaults to the value the adapter historically hard-coded, so
//! running with nothing but `EIGENDA_PRIVATE_KEY` set targets the Sepolia
//! testnet disperser exactly as before. Overrides are read from
//! `EIGENDA_`-prefixed environment variables.

use std::time::Duration;

use anyhow::Context as _;
use secrecy::SecretString;
use serde::Deserialize;

const DEFAULT_DISPERSER_RPC: &str = "https://disperser-testnet-sepolia.eigenda.xyz:443";
const DEFAULT_EIGENDA_ETH_RPC: &str = "https://ethereum-sepolia-rpc.publicnode.com";
/// EigenDA cert verifier contract deployed on Sepolia.
const DEFAULT_CERT_VERIFIER_ADDRESS: &str = "0x73818fed0743085c4557a736a7630447fb57c662";

const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATUS_TIMEOUT_SECS: u64 = 10;

/// Form in which the payload polynomial is handed to the disperser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolynomialForm {
    #[default]
    Coeff,
    Eval,
}

/// Configuration for the EigenDA remote disperser client.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EigenConfig {
    /// URL of the disperser RPC server.
    #[serde(default = "EigenConfig::default_disperser_rpc")]
    pub disperser_rpc: String,
    /// URL of the Ethereum RPC server used for certificate queries.
    #[serde(default = "EigenConfig::default_eigenda_eth_rpc")]
    pub eigenda_eth_rpc: String,
    /// Address of the cert verifier contract.
    #[serde(default = "EigenConfig::default_cert_verifier_addr")]
    pub cert_verifier_addr: String,
    /// Blob format version submitted with each dispersal.
    #[serde(default)]
    pub blob_version: u16,
    #[serde(default)]
    pub polynomial_form: PolynomialForm,
    /// Authenticated (TLS) dispersal.
    #[serde(default = "EigenConfig::default_authenticated")]
    pub authenticated: bool,
    /// Deadline for a single blob dispersal, in seconds.
    #[serde(default = "EigenConfig::default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,
    /// Deadline for a single status lookup, in seconds.
    #[serde(default = "EigenConfig::default_status_timeout_secs")]
    pub status_timeout_secs: u64,
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self {
            disperser_rpc: Self::default_disperser_rpc(),
            eigenda_eth_rpc: Self::default_eigenda_eth_rpc(),
            cert_verifier_addr: Self::default_cert_verifier_addr(),
            blob_version: 0,
            polynomial_form: PolynomialForm::Coeff,
            authenticated: Self::default_authenticated(),
            dispatch_timeout_secs: DEFAULT_DISPATCH_TIMEOUT_SECS,
            status_timeout_secs: DEFAULT_STATUS_TIMEOUT_SECS,
        }
    }
}

impl EigenConfig {
    fn default_disperser_rpc() -> String {
        DEFAULT_DISPERSER_RPC.to_string()
    }

    fn default_eigenda_eth_rpc() -> String {
        DEFAULT_EIGENDA_ETH_RPC.to_string()
    }

    fn default_cert_verifier_addr() -> String {
        DEFAULT_CERT_VERIFIER_ADDRESS.to_string()
    }

    fn default_authenticated() -> bool {
        true
    }

    fn default_dispatch_timeout_secs() -> u64 {
        DEFAULT_DISPATCH_TIMEOUT_SECS
    }

    fn default_status_timeout_secs() -> u64 {
        DEFAULT_STATUS_TIMEOUT_SECS
    }

    /// Loads the config from `EIGENDA_`-prefixed environment variables.
    /// Every field is optional; absent ones take the defaults above.
    pub fn from_env() -> anyhow::Result<Self> {
        envy::prefixed("EIGENDA_")
            .from_env()
            .context("Cannot load config <eigenda_signer>")
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}

/// ECDSA private key used to authenticate disperser requests. The inner
/// string is hex without a `0x` prefix and is redacted in debug output.
#[derive(Debug, Clone)]
pub struct PrivateKey(pub SecretString);

#[derive(Debug, Clone)]
pub struct EigenSecrets {
    pub private_key: PrivateKey,
}

impl EigenSecrets {
    /// Reads `EIGENDA_PRIVATE_KEY`, treating an empty value as unset and
    /// stripping an optional `0x` prefix.
    pub fn from_env() -> anyhow::Result<Self> {
        let raw = std::env::var("EIGENDA_PRIVATE_KEY").unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() {
            anyhow::bail!("EIGENDA_PRIVATE_KEY environment variable not set");
        }
        let key = raw.strip_prefix("0x").unwrap_or(raw);
        Ok(Self {
            private_key: PrivateKey(key.to_string().into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        sync::{Mutex, MutexGuard, PoisonError},
    };

    use secrecy::ExposeSecret as _;

    use super::*;

    /// Serializes tests that mutate process environment variables and rolls
    /// the mutated variables back when dropped.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        _lock: MutexGuard<'static, ()>,
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[(&'static str, Option<&str>)]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
            let mut saved = Vec::with_capacity(vars.len());
            for (name, value) in vars {
                saved.push((*name, env::var(name).ok()));
                match value {
                    Some(value) => env::set_var(name, value),
                    None => env::remove_var(name),
                }
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (name, value) in self.saved.drain(..) {
                match value {
                    Some(value) => env::set_var(name, value),
                    None => env::remove_var(name),
                }
            }
        }
    }

    #[test]
    fn defaults_match_historical_constants() {
        let _guard = EnvGuard::new(&[
            ("EIGENDA_DISPERSER_RPC", None),
            ("EIGENDA_BLOB_VERSION", None),
            ("EIGENDA_DISPATCH_TIMEOUT_SECS", None),
            ("EIGENDA_STATUS_TIMEOUT_SECS", None),
        ]);

        let config = EigenConfig::from_env().unwrap();
        assert_eq!(config, EigenConfig::default());
        assert_eq!(
            config.disperser_rpc,
            "https://disperser-testnet-sepolia.eigenda.xyz:443"
        );
        assert_eq!(config.blob_version, 0);
        assert!(config.authenticated);
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(30));
        assert_eq!(config.status_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn from_env_overrides() {
        let _guard = EnvGuard::new(&[
            ("EIGENDA_DISPERSER_RPC", Some("https://localhost:4242")),
            ("EIGENDA_BLOB_VERSION", Some("1")),
            ("EIGENDA_POLYNOMIAL_FORM", Some("eval")),
            ("EIGENDA_STATUS_TIMEOUT_SECS", Some("3")),
        ]);

        let config = EigenConfig::from_env().unwrap();
        assert_eq!(config.disperser_rpc, "https://localhost:4242");
        assert_eq!(config.blob_version, 1);
        assert_eq!(config.polynomial_form, PolynomialForm::Eval);
        assert_eq!(config.status_timeout(), Duration::from_secs(3));
        // Untouched fields keep their defaults.
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_private_key() {
        let _guard = EnvGuard::new(&[("EIGENDA_PRIVATE_KEY", None)]);
        let err = EigenSecrets::from_env().unwrap_err();
        assert_eq!(
            err.to_string(),
            "EIGENDA_PRIVATE_KEY environment variable not set"
        );
    }

    #[test]
    fn empty_private_key_counts_as_unset() {
        let _guard = EnvGuard::new(&[("EIGENDA_PRIVATE_KEY", Some(""))]);
        let err = EigenSecrets::from_env().unwrap_err();
        assert_eq!(
            err.to_string(),
            "EIGENDA_PRIVATE_KEY environment variable not set"
        );
    }

    #[test]
    fn private_key_prefix_is_stripped() {
        {
            let _guard = EnvGuard::new(&[("EIGENDA_PRIVATE_KEY", Some("0xabc123"))]);
            let secrets = EigenSecrets::from_env().unwrap();
            assert_eq!(secrets.private_key.0.expose_secret(), "abc123");
        }
        {
            let _guard = EnvGuard::new(&[("EIGENDA_PRIVATE_KEY", Some("abc123"))]);
            let secrets = EigenSecrets::from_env().unwrap();
            assert_eq!(secrets.private_key.0.expose_secret(), "abc123");
        }
    }
}
