mod config;
mod messages;
pub(crate) mod network;
mod session;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use flume::Sender;

use crate::actions::AppAction;
use crate::provider::{ProviderError, ProviderEvent, WalletCapabilities};
use crate::state::{newest_first, AppState, NetworkState, WalletState};
use crate::updates::{AppUpdate, CoreMsg, InternalEvent};

const INSTALL_WALLET_MSG: &str =
    "No wallet provider found. Please install a wallet extension such as MetaMask.";

/// Single-threaded app actor. Owns all session/network/message state, drives
/// every provider and contract call, and reconciles unsolicited wallet events
/// with user-initiated actions. Mutations happen only on the actor thread;
/// async side effects run on the owned runtime and report back through the
/// mailbox as [`InternalEvent`]s.
pub struct AppCore {
    pub state: AppState,
    rev: u64,

    update_sender: Sender<AppUpdate>,
    core_sender: Sender<CoreMsg>,
    shared_state: Arc<RwLock<AppState>>,

    config: config::AppConfig,
    runtime: tokio::runtime::Runtime,
    wallet: Option<WalletCapabilities>,

    // Guards spawned tasks (notably the provider event loop) against acting
    // for a core that has already been torn down.
    alive: Arc<AtomicBool>,
}

impl AppCore {
    pub fn new(
        update_sender: Sender<AppUpdate>,
        core_sender: Sender<CoreMsg>,
        data_dir: String,
        wallet: Option<WalletCapabilities>,
        shared_state: Arc<RwLock<AppState>>,
    ) -> Self {
        let config = config::load_app_config(&data_dir);
        tracing::info!(
            contract = %config.contract_address,
            accepted_chain = %config.accepted_chain_id,
            "core starting"
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .enable_io()
            .build()
            .expect("tokio runtime");

        let mut this = Self {
            state: AppState::empty(),
            rev: 0,
            update_sender,
            core_sender,
            shared_state,
            config,
            runtime,
            wallet,
            alive: Arc::new(AtomicBool::new(true)),
        };

        this.start_provider_events_loop();

        // Ensure App::state() has an immediately-available snapshot.
        let snapshot = this.state.clone();
        this.commit_state_snapshot(&snapshot);
        this
    }

    pub fn handle_message(&mut self, msg: CoreMsg) {
        match msg {
            CoreMsg::Action(ref action) => {
                // Never log the full action: SetComposeText carries user text.
                tracing::info!(action = action.tag(), "dispatch");
                self.handle_action(action.clone());
            }
            CoreMsg::Internal(internal) => self.handle_internal(*internal),
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Connect => self.handle_connect(),
            AppAction::SwitchNetwork => self.handle_switch_network(),
            AppAction::RefreshMessages => self.refresh_messages(),
            AppAction::SetComposeText { text } => self.handle_set_compose_text(text),
            AppAction::SendMessage => self.handle_send_message(),
            AppAction::ClearError => {
                if self.state.last_error.take().is_some() {
                    self.emit_state();
                }
            }
            AppAction::Foregrounded => self.handle_foregrounded(),
        }
    }

    fn handle_internal(&mut self, internal: InternalEvent) {
        match internal {
            InternalEvent::ConnectFinished { result } => self.handle_connect_finished(result),
            InternalEvent::SessionRestored { accounts } => self.handle_session_restored(accounts),
            InternalEvent::ChainFetched {
                chain_id,
                refresh_if_correct,
            } => self.handle_chain_fetched(chain_id, refresh_if_correct),
            InternalEvent::SwitchNetworkFinished { result } => {
                self.handle_switch_network_finished(result)
            }
            InternalEvent::MessagesFetched { result } => self.handle_messages_fetched(result),
            InternalEvent::SendFinished { result } => self.handle_send_finished(result),
            InternalEvent::ProviderAccountsChanged { accounts } => {
                self.apply_accounts_changed(accounts)
            }
            InternalEvent::ProviderChainChanged { chain_id } => self.apply_chain_changed(chain_id),
        }
    }

    fn next_rev(&mut self) -> u64 {
        self.rev += 1;
        self.state.rev = self.rev;
        self.rev
    }

    fn commit_state_snapshot(&self, snapshot: &AppState) {
        match self.shared_state.write() {
            Ok(mut g) => *g = snapshot.clone(),
            Err(poison) => *poison.into_inner() = snapshot.clone(),
        }
    }

    fn emit_state(&mut self) {
        self.next_rev();
        let snapshot = self.state.clone();
        self.commit_state_snapshot(&snapshot);
        let _ = self.update_sender.send(AppUpdate::FullState(snapshot));
    }

    /// Surface a user-facing failure. A single latest message: each new error
    /// replaces any prior one.
    fn report_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::info!(error = %msg, "surfacing error");
        self.state.last_error = Some(msg);
        self.emit_state();
    }

    fn accepted_network_name(&self) -> String {
        chaintalk_chains::network_name(&self.config.accepted_chain_id)
    }

    fn wrong_network_message(&self) -> String {
        format!("Please switch to {}", self.accepted_network_name())
    }
}

impl Drop for AppCore {
    fn drop(&mut self) {
        // Release the event subscription guard unconditionally on teardown.
        self.alive.store(false, Ordering::SeqCst);
    }
}
