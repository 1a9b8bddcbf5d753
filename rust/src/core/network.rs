// Network correctness: chain checks and switch-with-add fallback.

use super::*;

/// Outcome classification for the switch-network side effect. The add-chain
/// fallback has already been attempted (at most once) by the time this
/// reaches the actor.
#[derive(Debug)]
pub(crate) enum SwitchNetworkError {
    SwitchFailed(ProviderError),
    AddChainFailed(ProviderError),
}

impl AppCore {
    /// Query the wallet's current chain and re-derive network correctness.
    /// Optionally refreshes the message list when the chain turns out
    /// correct; no other side effects.
    pub(super) fn check_network(&mut self, refresh_if_correct: bool) {
        let Some(wallet) = self.wallet.clone() else {
            return;
        };
        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let chain_id = match wallet.provider.chain_id().await {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(%e, "failed to query chain id");
                    None
                }
            };
            let _ = tx.send(CoreMsg::Internal(Box::new(InternalEvent::ChainFetched {
                chain_id,
                refresh_if_correct,
            })));
        });
    }

    pub(super) fn handle_chain_fetched(
        &mut self,
        chain_id: Option<String>,
        refresh_if_correct: bool,
    ) {
        match chain_id {
            None => {
                // Unknown chain state blocks submission until a later check
                // succeeds.
                self.state.network.correct = false;
                self.emit_state();
            }
            Some(id) => {
                self.apply_chain_id(&id);
                self.emit_state();
                if refresh_if_correct && self.state.network.correct {
                    self.refresh_messages();
                }
            }
        }
    }

    fn apply_chain_id(&mut self, chain_id: &str) {
        let correct = chain_id == self.config.accepted_chain_id;
        tracing::debug!(chain_id, correct, "chain derived");
        self.state.network = NetworkState {
            chain_id: Some(chain_id.to_string()),
            name: Some(chaintalk_chains::network_name(chain_id)),
            correct,
        };
    }

    /// Ask the wallet to switch to the accepted chain. If the wallet does not
    /// know the chain (4902), fall back once to adding it with the registry's
    /// fixed parameter set; any further failure surfaces a manual-action
    /// message and is never retried silently.
    pub(super) fn handle_switch_network(&mut self) {
        self.state.last_error = None;
        let Some(wallet) = self.wallet.clone() else {
            self.report_error(INSTALL_WALLET_MSG);
            return;
        };

        let target = self.config.accepted_chain_id.clone();
        let add_params =
            chaintalk_chains::find(&target).map(|profile| profile.add_chain_params());
        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let result = match wallet.provider.switch_chain(&target).await {
                Ok(()) => Ok(()),
                Err(e) if e.is_unknown_chain() => match add_params {
                    Some(params) => wallet
                        .provider
                        .add_chain(&params)
                        .await
                        .map_err(SwitchNetworkError::AddChainFailed),
                    // Accepted chain missing from the registry: nothing to
                    // add, treat as an add failure.
                    None => Err(SwitchNetworkError::AddChainFailed(e)),
                },
                Err(e) => Err(SwitchNetworkError::SwitchFailed(e)),
            };
            let _ = tx.send(CoreMsg::Internal(Box::new(
                InternalEvent::SwitchNetworkFinished { result },
            )));
        });
    }

    pub(super) fn handle_switch_network_finished(
        &mut self,
        result: Result<(), SwitchNetworkError>,
    ) {
        match result {
            // The wallet emits a chain-changed event after a successful
            // switch; state follows from that.
            Ok(()) => tracing::debug!("network switch accepted"),
            Err(SwitchNetworkError::SwitchFailed(e)) if e.is_user_rejection() => {
                self.report_error("Network switch rejected in wallet");
            }
            Err(SwitchNetworkError::SwitchFailed(e)) => {
                tracing::warn!(%e, "network switch failed");
                self.report_error(format!("Failed to switch network: {e}"));
            }
            Err(SwitchNetworkError::AddChainFailed(e)) => {
                tracing::warn!(%e, "add chain failed");
                self.report_error(format!(
                    "Unable to add {} to the wallet, please add it manually",
                    self.accepted_network_name()
                ));
            }
        }
    }

    /// Unsolicited chain change from the wallet.
    pub(super) fn apply_chain_changed(&mut self, chain_id: String) {
        self.apply_chain_id(&chain_id);
        self.emit_state();
        if self.state.network.correct && self.state.wallet.is_connected() {
            if self.state.submitting {
                // The in-flight write triggers its own refresh on
                // confirmation; avoid interleaving a second one.
                tracing::debug!("chain correct again mid-send; skipping refresh");
            } else {
                self.refresh_messages();
            }
        }
    }
}
