//! ChainTalk session reconciler.
//!
//! The observable logic of the page lives in a single-threaded app actor
//! (`AppCore`) that owns all session, network, and message-list state. The
//! rendering shell dispatches [`AppAction`]s, receives [`AppUpdate`] snapshots,
//! and never talks to the wallet directly: the wallet is injected as
//! [`WalletCapabilities`] so tests can substitute a scripted double.

mod actions;
mod core;
mod logging;
mod provider;
mod state;
mod updates;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;

use flume::{Receiver, Sender};

pub use actions::AppAction;
pub use provider::*;
pub use state::*;
pub use updates::*;

pub trait AppReconciler: Send + Sync + 'static {
    fn reconcile(&self, update: AppUpdate);
}

pub struct App {
    core_tx: Sender<CoreMsg>,
    update_rx: Receiver<AppUpdate>,
    listening: AtomicBool,
    shared_state: Arc<RwLock<AppState>>,
}

impl App {
    /// Build the core and start its actor thread. `wallet` is `None` when the
    /// page found no wallet extension; every wallet-dependent action then
    /// surfaces an install message instead.
    ///
    /// Session state is never persisted: a `Foregrounded` pass is queued
    /// immediately so each load rebuilds it by querying the provider.
    pub fn new(data_dir: String, wallet: Option<WalletCapabilities>) -> Arc<Self> {
        logging::init_logging();
        tracing::info!(data_dir = %data_dir, wallet_present = wallet.is_some(), "App::new() starting");

        let (update_tx, update_rx) = flume::unbounded();
        let (core_tx, core_rx) = flume::unbounded::<CoreMsg>();
        let shared_state = Arc::new(RwLock::new(AppState::empty()));

        // Actor loop thread (single threaded "app actor").
        let core_tx_for_core = core_tx.clone();
        let shared_for_core = shared_state.clone();
        thread::spawn(move || {
            let mut core = crate::core::AppCore::new(
                update_tx,
                core_tx_for_core,
                data_dir,
                wallet,
                shared_for_core,
            );
            while let Ok(msg) = core_rx.recv() {
                core.handle_message(msg);
            }
        });

        let _ = core_tx.send(CoreMsg::Action(AppAction::Foregrounded));

        Arc::new(Self {
            core_tx,
            update_rx,
            listening: AtomicBool::new(false),
            shared_state,
        })
    }

    pub fn state(&self) -> AppState {
        match self.shared_state.read() {
            Ok(g) => g.clone(),
            Err(poison) => poison.into_inner().clone(),
        }
    }

    pub fn dispatch(&self, action: AppAction) {
        // Contract: never block caller.
        let _ = self.core_tx.send(CoreMsg::Action(action));
    }

    pub fn listen_for_updates(&self, reconciler: Box<dyn AppReconciler>) {
        if self
            .listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            // Avoid multiple listeners that would split messages.
            return;
        }

        let rx = self.update_rx.clone();
        thread::spawn(move || {
            while let Ok(update) = rx.recv() {
                reconciler.reconcile(update);
            }
        });
    }
}
