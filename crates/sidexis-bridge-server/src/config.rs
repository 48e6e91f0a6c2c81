//! Connector configuration.
//!
//! The original deployment resolves the Sidexis installation and mailslot
//! paths through the vendor options manager; here they come from a small
//! JSON file next to the binary, with workable defaults when it is absent.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Localhost endpoint the web client connects to.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:37319";

const DEFAULT_CONFIG_PATH: &str = "sidexis-bridge.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// TCP endpoint for the single-shot WebSocket listener.
    pub listen_addr: String,
    /// Shared SLIDA integration file polled by Sidexis.
    pub slida_path: PathBuf,
    /// Sidexis executable to launch once the tokens are written.
    pub sidexis_path: PathBuf,
    /// Connector log file.
    pub log_path: PathBuf,
    /// Station name stamped on outgoing tokens.
    pub station_name: String,
    /// Application name used in the sender address.
    pub sender_app: String,
    /// Application name used in the receiver address.
    pub receiver_app: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            slida_path: PathBuf::from("slida.sdx"),
            sidexis_path: PathBuf::from("Sidexis.exe"),
            log_path: PathBuf::from("sidexis-bridge.log"),
            station_name: station_name_from_env(),
            sender_app: "TidyClinic".to_string(),
            receiver_app: "PDATA".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load from an explicit path, or the default path, falling back to
    /// defaults when no file exists.
    pub fn load(path: Option<String>) -> anyhow::Result<Self> {
        let path = path.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        match fs::read_to_string(&path) {
            Ok(text) => {
                serde_json::from_str(&text).with_context(|| format!("invalid config file {path}"))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("cannot read config file {path}")),
        }
    }
}

/// The station is the machine name, as Sidexis knows it.
fn station_name_from_env() -> String {
    std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .unwrap_or_else(|_| "UNKNOWN".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = BridgeConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:37319");
        assert_eq!(config.sender_app, "TidyClinic");
        assert_eq!(config.receiver_app, "PDATA");
        assert!(!config.station_name.is_empty());
    }

    #[test]
    fn partial_config_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        fs::write(&path, r#"{"slida_path":"C:/Sidexis/slida.sdx"}"#).unwrap();

        let config = BridgeConfig::load(Some(path.to_string_lossy().into_owned())).unwrap();
        assert_eq!(config.slida_path, PathBuf::from("C:/Sidexis/slida.sdx"));
        assert_eq!(config.listen_addr, "127.0.0.1:37319");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = BridgeConfig::load(Some("does-not-exist.json".to_string())).unwrap();
        assert_eq!(config.sender_app, "TidyClinic");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.json");
        fs::write(&path, "not json").unwrap();

        assert!(BridgeConfig::load(Some(path.to_string_lossy().into_owned())).is_err());
    }
}
