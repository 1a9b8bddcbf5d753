//! Injected wallet capability surface.
//!
//! The browser page hands the core a wallet provider (the extension's
//! request/event interface) and a message-wall contract client bound to that
//! provider. Both are trait objects so tests can substitute scripted doubles;
//! the core never reaches for an ambient global.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

pub use chaintalk_chains::AddChainParams;

use crate::state::WallMessage;

/// EIP-1193 style error codes the core inspects.
pub const CODE_USER_REJECTED: i64 = 4001;
pub const CODE_UNKNOWN_CHAIN: i64 = 4902;
pub const CODE_INTERNAL: i64 = -32603;

/// Structured error from the wallet provider or a contract call made through
/// it. `code` follows the provider's numeric convention when one was supplied;
/// `reason` carries a node-supplied revert reason when present.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
    pub reason: Option<String>,
}

impl ProviderError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
            reason: None,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            reason: None,
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(CODE_USER_REJECTED, "user rejected the request")
    }

    pub fn unknown_chain(chain_id: &str) -> Self {
        Self::new(
            CODE_UNKNOWN_CHAIN,
            format!("unrecognized chain id {chain_id}"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CODE_INTERNAL, message)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(CODE_USER_REJECTED)
    }

    pub fn is_unknown_chain(&self) -> bool {
        self.code == Some(CODE_UNKNOWN_CHAIN)
    }

    pub fn is_node_failure(&self) -> bool {
        self.code == Some(CODE_INTERNAL)
    }
}

/// Unsolicited wallet events; not caused by this core's own calls.
#[derive(Clone, Debug)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

/// Account and chain operations of the wallet extension.
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Prompt the user for account access (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Query already-authorized accounts without prompting (`eth_accounts`).
    async fn get_accounts(&self) -> Result<Vec<String>, ProviderError>;

    async fn chain_id(&self) -> Result<String, ProviderError>;

    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderError>;

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderError>;

    /// Event stream for account/chain changes. Each call returns a fresh
    /// receiver on the provider's broadcast channel.
    fn subscribe_events(&self) -> broadcast::Receiver<ProviderEvent>;
}

/// A submitted write whose effect is not durable until confirmed.
#[async_trait]
pub trait PendingWrite: Send {
    async fn wait_confirmed(self: Box<Self>) -> Result<(), ProviderError>;
}

/// Read/write interface of the deployed message-wall contract, exercised over
/// the wallet provider's RPC connection.
#[async_trait]
pub trait MessageWall: Send + Sync + 'static {
    /// Full message set in natural (oldest-first) on-chain order.
    async fn get_all_messages(&self) -> Result<Vec<WallMessage>, ProviderError>;

    /// Submit a message signed by `signer_account`. The returned handle must
    /// be awaited before the write is treated as durable.
    async fn add_message(
        &self,
        signer_account: &str,
        text: &str,
    ) -> Result<Box<dyn PendingWrite>, ProviderError>;
}

/// The capabilities an embedding page injects when a wallet extension is
/// present. Absent entirely when no wallet is installed.
#[derive(Clone)]
pub struct WalletCapabilities {
    pub provider: Arc<dyn WalletProvider>,
    pub wall: Arc<dyn MessageWall>,
}
