// Session lifecycle: connect, silent re-derivation, provider event loop.

use super::*;

impl AppCore {
    /// User-initiated connect: prompt the wallet for account access.
    pub(super) fn handle_connect(&mut self) {
        self.state.last_error = None;
        let Some(wallet) = self.wallet.clone() else {
            self.report_error(INSTALL_WALLET_MSG);
            return;
        };
        if matches!(self.state.wallet, WalletState::Connecting) {
            // One wallet prompt at a time.
            return;
        }

        self.state.wallet = WalletState::Connecting;
        self.emit_state();

        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let result = wallet.provider.request_accounts().await;
            let _ = tx.send(CoreMsg::Internal(Box::new(InternalEvent::ConnectFinished {
                result,
            })));
        });
    }

    pub(super) fn handle_connect_finished(
        &mut self,
        result: Result<Vec<String>, ProviderError>,
    ) {
        match result {
            Err(e) => {
                tracing::info!(%e, code = ?e.code, "connect failed");
                self.state.wallet = WalletState::Disconnected;
                if e.is_user_rejection() {
                    // Informational only; never retried automatically.
                    self.report_error("Connection request rejected in wallet");
                } else {
                    self.report_error(format!("Failed to connect wallet: {e}"));
                }
            }
            Ok(accounts) => match accounts.first() {
                // Resolved with zero accounts: stay disconnected, no network
                // check.
                None => {
                    self.state.wallet = WalletState::Disconnected;
                    self.emit_state();
                }
                Some(account) => {
                    tracing::info!(account = %crate::state::short_address(account), "wallet connected");
                    self.state.wallet = WalletState::Connected {
                        account: account.clone(),
                    };
                    self.emit_state();
                    self.check_network(true);
                }
            },
        }
    }

    /// Lifecycle re-derivation: query already-authorized accounts without
    /// prompting. Absent wallet or provider failure is not user-visible here.
    pub(super) fn handle_foregrounded(&mut self) {
        let Some(wallet) = self.wallet.clone() else {
            tracing::debug!("foregrounded without a wallet provider");
            return;
        };
        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            match wallet.provider.get_accounts().await {
                Ok(accounts) => {
                    let _ = tx.send(CoreMsg::Internal(Box::new(
                        InternalEvent::SessionRestored { accounts },
                    )));
                }
                Err(e) => tracing::warn!(%e, "failed to query authorized accounts"),
            }
        });
    }

    pub(super) fn handle_session_restored(&mut self, accounts: Vec<String>) {
        match accounts.first() {
            None => {
                if self.state.wallet.is_connected() {
                    self.disconnect();
                    self.emit_state();
                }
            }
            Some(account) => {
                self.state.wallet = WalletState::Connected {
                    account: account.clone(),
                };
                self.emit_state();
                self.check_network(true);
            }
        }
    }

    /// Unsolicited account-list change. An empty list forces full disconnect
    /// regardless of prior state.
    pub(super) fn apply_accounts_changed(&mut self, accounts: Vec<String>) {
        match accounts.first() {
            None => {
                tracing::info!("wallet reported no accounts; disconnecting");
                self.disconnect();
                self.emit_state();
            }
            Some(account) => {
                self.state.wallet = WalletState::Connected {
                    account: account.clone(),
                };
                self.emit_state();
                self.check_network(false);
            }
        }
    }

    fn disconnect(&mut self) {
        self.state.wallet = WalletState::Disconnected;
        self.state.network.correct = false;
    }

    /// Forward unsolicited provider events into the actor mailbox. Subscribed
    /// once at core start; the `alive` guard releases it on teardown.
    pub(super) fn start_provider_events_loop(&mut self) {
        let Some(wallet) = self.wallet.as_ref() else {
            return;
        };
        let mut rx = wallet.provider.subscribe_events();
        let tx = self.core_sender.clone();
        let alive = self.alive.clone();
        self.runtime.spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if !alive.load(Ordering::SeqCst) {
                            break;
                        }
                        let internal = match event {
                            ProviderEvent::AccountsChanged(accounts) => {
                                InternalEvent::ProviderAccountsChanged { accounts }
                            }
                            ProviderEvent::ChainChanged(chain_id) => {
                                InternalEvent::ProviderChainChanged { chain_id }
                            }
                        };
                        let _ = tx.send(CoreMsg::Internal(Box::new(internal)));
                    }
                    // A malformed/overflowing stream must not crash the
                    // reconciler: log and move on.
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "provider event stream lagged");
                        continue;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}
