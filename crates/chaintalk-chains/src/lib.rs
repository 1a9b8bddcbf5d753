use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainProfile {
    pub chain_id: &'static str,
    pub name: &'static str,
    pub currency_name: &'static str,
    pub currency_symbol: &'static str,
    pub currency_decimals: u8,
    pub rpc_urls: &'static [&'static str],
    pub block_explorer_urls: &'static [&'static str],
}

/// Parameter set for a wallet "add chain" request, shaped like the
/// `wallet_addEthereumChain` payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl ChainProfile {
    pub fn add_chain_params(&self) -> AddChainParams {
        AddChainParams {
            chain_id: self.chain_id.to_string(),
            chain_name: self.name.to_string(),
            native_currency: NativeCurrency {
                name: self.currency_name.to_string(),
                symbol: self.currency_symbol.to_string(),
                decimals: self.currency_decimals,
            },
            rpc_urls: self.rpc_urls.iter().map(|u| (*u).to_string()).collect(),
            block_explorer_urls: self
                .block_explorer_urls
                .iter()
                .map(|u| (*u).to_string())
                .collect(),
        }
    }
}

pub const ETHEREUM_MAINNET: ChainProfile = ChainProfile {
    chain_id: "0x1",
    name: "Ethereum Mainnet",
    currency_name: "Ether",
    currency_symbol: "ETH",
    currency_decimals: 18,
    rpc_urls: &["https://eth.llamarpc.com"],
    block_explorer_urls: &["https://etherscan.io/"],
};

pub const SEPOLIA: ChainProfile = ChainProfile {
    chain_id: "0xaa36a7",
    name: "Sepolia Testnet",
    currency_name: "SepoliaETH",
    currency_symbol: "ETH",
    currency_decimals: 18,
    rpc_urls: &["https://sepolia.infura.io/v3/", "https://rpc.sepolia.org"],
    block_explorer_urls: &["https://sepolia.etherscan.io/"],
};

pub const GOERLI: ChainProfile = ChainProfile {
    chain_id: "0x5",
    name: "Goerli Testnet",
    currency_name: "GoerliETH",
    currency_symbol: "ETH",
    currency_decimals: 18,
    rpc_urls: &["https://rpc.ankr.com/eth_goerli"],
    block_explorer_urls: &["https://goerli.etherscan.io/"],
};

pub const POLYGON_MAINNET: ChainProfile = ChainProfile {
    chain_id: "0x89",
    name: "Polygon Mainnet",
    currency_name: "POL",
    currency_symbol: "POL",
    currency_decimals: 18,
    rpc_urls: &["https://polygon-rpc.com"],
    block_explorer_urls: &["https://polygonscan.com/"],
};

pub const KNOWN_CHAINS: &[ChainProfile] = &[ETHEREUM_MAINNET, SEPOLIA, GOERLI, POLYGON_MAINNET];

/// The chain the deployed message wall lives on.
pub fn default_chain() -> ChainProfile {
    SEPOLIA
}

pub fn find(chain_id: &str) -> Option<&'static ChainProfile> {
    KNOWN_CHAINS.iter().find(|c| c.chain_id == chain_id)
}

/// Human-readable label for a wallet-reported chain id. Unknown ids keep the
/// raw id visible so the user can tell what their wallet is actually on.
pub fn network_name(chain_id: &str) -> String {
    match find(chain_id) {
        Some(profile) => profile.name.to_string(),
        None => format!("Unknown Network ({chain_id})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chain_names_resolve() {
        assert_eq!(network_name("0x1"), "Ethereum Mainnet");
        assert_eq!(network_name("0xaa36a7"), "Sepolia Testnet");
        assert_eq!(network_name("0x5"), "Goerli Testnet");
        assert_eq!(network_name("0x89"), "Polygon Mainnet");
    }

    #[test]
    fn unknown_chain_keeps_raw_id() {
        assert_eq!(network_name("0x9999"), "Unknown Network (0x9999)");
    }

    #[test]
    fn default_chain_is_sepolia() {
        let chain = default_chain();
        assert_eq!(chain.chain_id, "0xaa36a7");
        assert_eq!(chain.name, "Sepolia Testnet");
    }

    #[test]
    fn add_chain_params_carry_full_parameter_set() {
        let params = SEPOLIA.add_chain_params();
        assert_eq!(params.chain_id, "0xaa36a7");
        assert_eq!(params.native_currency.symbol, "ETH");
        assert_eq!(params.native_currency.decimals, 18);
        assert!(!params.rpc_urls.is_empty());
        assert!(!params.block_explorer_urls.is_empty());
    }
}
