use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// The deployed message-wall instance this build talks to.
const DEFAULT_CONTRACT_ADDRESS: &str = "0x23ea9d4aC270A0be9E8035bdb9a5c24f8Ff3499d";

const CONFIG_FILE: &str = "chaintalk_config.json";

/// Deployment target configuration, read from `chaintalk_config.json` in the
/// data dir. One contract address, one accepted chain id; no multi-network
/// support.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub contract_address: String,
    pub accepted_chain_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            accepted_chain_id: chaintalk_chains::default_chain().chain_id.to_string(),
        }
    }
}

/// Missing file means defaults; an unreadable or malformed file is logged and
/// also falls back to defaults rather than wedging the core.
pub(crate) fn load_app_config(data_dir: &str) -> AppConfig {
    let path = Path::new(data_dir).join(CONFIG_FILE);
    if !path.exists() {
        return AppConfig::default();
    }
    match read_config(&path) {
        Ok(cfg) => {
            if !is_plausible_address(&cfg.contract_address) {
                tracing::warn!(address = %cfg.contract_address, "configured contract address does not look like a 20-byte hex address");
            }
            cfg
        }
        Err(e) => {
            tracing::warn!(%e, path = %path.display(), "failed to load config; using defaults");
            AppConfig::default()
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let cfg = serde_json::from_str(&raw).context("parse config json")?;
    Ok(cfg)
}

fn is_plausible_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .map(|h| h.len() == 40 && hex::decode(h).is_ok())
        .unwrap_or(false)
}
