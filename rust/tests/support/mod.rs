#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::broadcast;

use chaintalk_core::{
    AddChainParams, MessageWall, PendingWrite, ProviderError, ProviderEvent, WallMessage,
    WalletCapabilities, WalletProvider,
};

/// Scripted in-memory wallet + contract double. Tests pre-load accounts,
/// chain id, messages, and failure modes, then drive the core and observe
/// snapshots.
pub struct MockWallet {
    inner: Mutex<Inner>,
    events_tx: broadcast::Sender<ProviderEvent>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<String>,
    /// Whether `eth_accounts` already returns the accounts without a prompt.
    authorized: bool,
    chain_id: String,

    request_accounts_error: Option<ProviderError>,
    switch_error: Option<ProviderError>,
    add_chain_error: Option<ProviderError>,
    fetch_error: Option<ProviderError>,
    add_message_error: Option<ProviderError>,
    /// Wallets switch to a chain right after successfully adding it.
    switch_after_add: bool,
    confirm_delay: Duration,

    messages: Vec<WallMessage>,

    request_accounts_calls: usize,
    get_accounts_calls: usize,
    chain_id_calls: usize,
    switch_calls: usize,
    add_chain_calls: usize,
    fetch_calls: usize,
    add_message_calls: usize,
}

impl MockWallet {
    pub fn new(chain_id: &str) -> Arc<Self> {
        let (events_tx, _) = broadcast::channel(16);
        Arc::new(Self {
            inner: Mutex::new(Inner {
                chain_id: chain_id.to_string(),
                switch_after_add: true,
                ..Inner::default()
            }),
            events_tx,
        })
    }

    pub fn capabilities(self: &Arc<Self>) -> WalletCapabilities {
        WalletCapabilities {
            provider: self.clone(),
            wall: self.clone(),
        }
    }

    pub fn set_accounts(&self, accounts: &[&str]) {
        self.inner.lock().unwrap().accounts = accounts.iter().map(|a| a.to_string()).collect();
    }

    pub fn set_authorized(&self, authorized: bool) {
        self.inner.lock().unwrap().authorized = authorized;
    }

    pub fn set_request_accounts_error(&self, err: ProviderError) {
        self.inner.lock().unwrap().request_accounts_error = Some(err);
    }

    pub fn set_switch_error(&self, err: ProviderError) {
        self.inner.lock().unwrap().switch_error = Some(err);
    }

    pub fn set_add_chain_error(&self, err: ProviderError) {
        self.inner.lock().unwrap().add_chain_error = Some(err);
    }

    pub fn set_fetch_error(&self, err: ProviderError) {
        self.inner.lock().unwrap().fetch_error = Some(err);
    }

    pub fn set_add_message_error(&self, err: ProviderError) {
        self.inner.lock().unwrap().add_message_error = Some(err);
    }

    pub fn set_confirm_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().confirm_delay = delay;
    }

    pub fn set_messages(&self, messages: Vec<WallMessage>) {
        self.inner.lock().unwrap().messages = messages;
    }

    pub fn push_message(&self, message: WallMessage) {
        self.inner.lock().unwrap().messages.push(message);
    }

    /// Simulate the user switching accounts (or disconnecting the site) in
    /// the wallet UI.
    pub fn push_accounts_changed(&self, accounts: &[&str]) {
        let accounts: Vec<String> = accounts.iter().map(|a| a.to_string()).collect();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.accounts = accounts.clone();
            inner.authorized = !accounts.is_empty();
        }
        let _ = self
            .events_tx
            .send(ProviderEvent::AccountsChanged(accounts));
    }

    /// Simulate the user switching networks in the wallet UI.
    pub fn push_chain_changed(&self, chain_id: &str) {
        self.inner.lock().unwrap().chain_id = chain_id.to_string();
        let _ = self
            .events_tx
            .send(ProviderEvent::ChainChanged(chain_id.to_string()));
    }

    pub fn chain_id_calls(&self) -> usize {
        self.inner.lock().unwrap().chain_id_calls
    }

    pub fn switch_calls(&self) -> usize {
        self.inner.lock().unwrap().switch_calls
    }

    pub fn add_chain_calls(&self) -> usize {
        self.inner.lock().unwrap().add_chain_calls
    }

    pub fn fetch_calls(&self) -> usize {
        self.inner.lock().unwrap().fetch_calls
    }

    pub fn add_message_calls(&self) -> usize {
        self.inner.lock().unwrap().add_message_calls
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.request_accounts_calls += 1;
        if let Some(err) = inner.request_accounts_error.clone() {
            return Err(err);
        }
        inner.authorized = true;
        Ok(inner.accounts.clone())
    }

    async fn get_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.get_accounts_calls += 1;
        if inner.authorized {
            Ok(inner.accounts.clone())
        } else {
            Ok(vec![])
        }
    }

    async fn chain_id(&self) -> Result<String, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.chain_id_calls += 1;
        Ok(inner.chain_id.clone())
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderError> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.switch_calls += 1;
            if let Some(err) = inner.switch_error.clone() {
                return Err(err);
            }
        }
        self.push_chain_changed(chain_id);
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderError> {
        let switch_after_add = {
            let mut inner = self.inner.lock().unwrap();
            inner.add_chain_calls += 1;
            if let Some(err) = inner.add_chain_error.clone() {
                return Err(err);
            }
            inner.switch_after_add
        };
        if switch_after_add {
            self.push_chain_changed(&params.chain_id);
        }
        Ok(())
    }

    fn subscribe_events(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events_tx.subscribe()
    }
}

struct MockPending {
    delay: Duration,
}

#[async_trait]
impl PendingWrite for MockPending {
    async fn wait_confirmed(self: Box<Self>) -> Result<(), ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

#[async_trait]
impl MessageWall for MockWallet {
    async fn get_all_messages(&self) -> Result<Vec<WallMessage>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetch_calls += 1;
        if let Some(err) = inner.fetch_error.clone() {
            return Err(err);
        }
        Ok(inner.messages.clone())
    }

    async fn add_message(
        &self,
        signer_account: &str,
        text: &str,
    ) -> Result<Box<dyn PendingWrite>, ProviderError> {
        let mut inner = self.inner.lock().unwrap();
        inner.add_message_calls += 1;
        if let Some(err) = inner.add_message_error.clone() {
            return Err(err);
        }
        // Appended in chain order; visible to the next fetch.
        inner.messages.push(WallMessage {
            author: signer_account.to_string(),
            text: text.to_string(),
            timestamp: chaintalk_core::now_seconds(),
        });
        Ok(Box::new(MockPending {
            delay: inner.confirm_delay,
        }))
    }
}

pub fn wall_message(author: &str, text: &str, timestamp: i64) -> WallMessage {
    WallMessage {
        author: author.to_string(),
        text: text.to_string(),
        timestamp,
    }
}

pub fn wait_until(what: &str, timeout: Duration, mut f: impl FnMut() -> bool) {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if f() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("{what}: condition not met within {timeout:?}");
}
