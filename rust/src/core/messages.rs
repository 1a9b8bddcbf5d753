// Message-list reads and the single in-flight write.

use super::*;

/// Client-side cap; the contract itself does not enforce one.
const MAX_MESSAGE_CHARS: usize = 500;

impl AppCore {
    /// Wholesale message-list refresh. Requires a wallet and the accepted
    /// network; otherwise surfaces an explanatory error and leaves the cached
    /// list untouched. Concurrent refreshes race benignly: the later response
    /// wins the full replace.
    pub(super) fn refresh_messages(&mut self) {
        let Some(wallet) = self.wallet.clone() else {
            self.report_error(INSTALL_WALLET_MSG);
            return;
        };
        if !self.state.network.correct {
            self.report_error(self.wrong_network_message());
            return;
        }

        self.state.loading = true;
        self.state.last_error = None;
        self.emit_state();

        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let result = wallet.wall.get_all_messages().await;
            let _ = tx.send(CoreMsg::Internal(Box::new(InternalEvent::MessagesFetched {
                result,
            })));
        });
    }

    pub(super) fn handle_messages_fetched(
        &mut self,
        result: Result<Vec<crate::state::WallMessage>, ProviderError>,
    ) {
        self.state.loading = false;
        match result {
            Ok(messages) => {
                tracing::debug!(count = messages.len(), "messages fetched");
                // Atomic replace, newest-first; a failed refresh can never
                // leave a partial list behind.
                self.state.messages = newest_first(messages);
                self.emit_state();
            }
            Err(e) => {
                tracing::warn!(%e, "message fetch failed");
                self.report_error(format!("Failed to fetch messages: {e}"));
            }
        }
    }

    pub(super) fn handle_set_compose_text(&mut self, text: String) {
        if self.state.compose_text != text {
            self.state.compose_text = text;
            self.emit_state();
        }
    }

    /// Submit the current draft. At most one write in flight: a second
    /// attempt is rejected, not queued.
    pub(super) fn handle_send_message(&mut self) {
        let text = self.state.compose_text.trim().to_string();
        if text.is_empty() {
            self.report_error("Please enter message content");
            return;
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            self.report_error(format!(
                "Message is limited to {MAX_MESSAGE_CHARS} characters"
            ));
            return;
        }
        if self.state.submitting {
            self.report_error("A message is already being submitted");
            return;
        }
        let Some(wallet) = self.wallet.clone() else {
            self.report_error(INSTALL_WALLET_MSG);
            return;
        };
        if !self.state.network.correct {
            self.report_error(self.wrong_network_message());
            return;
        }
        let Some(account) = self.state.wallet.account().map(ToString::to_string) else {
            self.report_error("Connect a wallet before sending");
            return;
        };

        self.state.submitting = true;
        self.state.last_error = None;
        self.emit_state();

        let tx = self.core_sender.clone();
        self.runtime.spawn(async move {
            let result = async {
                let pending = wallet.wall.add_message(&account, &text).await?;
                // The write is durable only once confirmed.
                pending.wait_confirmed().await
            }
            .await;
            let _ = tx.send(CoreMsg::Internal(Box::new(InternalEvent::SendFinished {
                result,
            })));
        });
    }

    /// Always clears `submitting`, success or failure.
    pub(super) fn handle_send_finished(&mut self, result: Result<(), ProviderError>) {
        self.state.submitting = false;
        match result {
            Ok(()) => {
                self.state.compose_text.clear();
                self.emit_state();
                self.refresh_messages();
            }
            Err(e) => {
                tracing::warn!(%e, code = ?e.code, "send failed");
                self.report_error(user_visible_send_error(&e));
            }
        }
    }
}

/// Classify a failed write into the user-facing message by provider error
/// code, mirroring the wallet's numeric convention.
fn user_visible_send_error(err: &ProviderError) -> String {
    if err.is_user_rejection() {
        "Transaction rejected in wallet".to_string()
    } else if err.is_node_failure() {
        "Transaction failed, please check your network connection".to_string()
    } else {
        format!(
            "Failed to send message: {}",
            err.reason.as_deref().unwrap_or(&err.message)
        )
    }
}
