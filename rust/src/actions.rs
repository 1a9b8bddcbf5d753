/// User intents dispatched from the page into the core actor.
#[derive(Clone, Debug)]
pub enum AppAction {
    // Wallet
    Connect,
    SwitchNetwork,

    // Messages
    RefreshMessages,
    SetComposeText { text: String },
    SendMessage,

    // UI
    ClearError,

    // Lifecycle: re-derive session state from the provider without prompting.
    Foregrounded,
}

impl AppAction {
    /// Log-safe action tag (never includes drafted message text).
    pub fn tag(&self) -> &'static str {
        match self {
            AppAction::Connect => "Connect",
            AppAction::SwitchNetwork => "SwitchNetwork",
            AppAction::RefreshMessages => "RefreshMessages",
            AppAction::SetComposeText { .. } => "SetComposeText",
            AppAction::SendMessage => "SendMessage",
            AppAction::ClearError => "ClearError",
            AppAction::Foregrounded => "Foregrounded",
        }
    }
}
