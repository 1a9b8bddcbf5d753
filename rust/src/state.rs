use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Wallet connection state. A connected wallet always carries its account;
/// "connected without an account" is unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { account: String },
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn account(&self) -> Option<&str> {
        match self {
            WalletState::Connected { account } => Some(account),
            _ => None,
        }
    }
}

/// What the wallet last reported about its selected chain. `chain_id`/`name`
/// stay `None` until the first successful chain query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkState {
    pub chain_id: Option<String>,
    pub name: Option<String>,
    pub correct: bool,
}

/// One on-chain message. Immutable once read; the authoritative copy lives in
/// the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallMessage {
    pub author: String,
    pub text: String,
    pub timestamp: i64,
}

impl WallMessage {
    /// Timestamp rendered for display, e.g. `2024-03-01 17:45 UTC`.
    pub fn display_time(&self) -> String {
        match chrono::DateTime::from_timestamp(self.timestamp, 0) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => format!("@{}", self.timestamp),
        }
    }

    pub fn short_author(&self) -> String {
        short_address(&self.author)
    }
}

/// `0x1234...abcd` style address shortening for display.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        // A cut point lands inside a multi-byte character: leave the string
        // untouched rather than splitting it.
        _ => address.to_string(),
    }
}

/// Reorder a fetched on-chain sequence (oldest-first) for display
/// (newest-first).
pub fn newest_first(mut messages: Vec<WallMessage>) -> Vec<WallMessage> {
    messages.reverse();
    messages
}

/// Full view-state snapshot. Cloned out of the actor on every change and
/// stamped with a monotonically increasing `rev`.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub rev: u64,
    pub wallet: WalletState,
    pub network: NetworkState,
    /// Newest-first cache of the on-chain message list. Replaced wholesale on
    /// refresh, never merged.
    pub messages: Vec<WallMessage>,
    /// Draft of the message being composed.
    pub compose_text: String,
    /// A message-list fetch is outstanding.
    pub loading: bool,
    /// A write is in flight; at most one at a time.
    pub submitting: bool,
    /// Latest user-facing error, replacing any prior one.
    pub last_error: Option<String>,
}

impl AppState {
    pub fn empty() -> Self {
        Self {
            rev: 0,
            wallet: WalletState::Disconnected,
            network: NetworkState::default(),
            messages: Vec::new(),
            compose_text: String::new(),
            loading: false,
            submitting: false,
            last_error: None,
        }
    }
}
