use crate::core::network::SwitchNetworkError;
use crate::provider::ProviderError;
use crate::state::{AppState, WallMessage};
use crate::AppAction;

#[derive(Clone, Debug)]
pub enum AppUpdate {
    /// Primary update stream: always a full state snapshot. Simplest possible
    /// reconciliation story for the rendering shell.
    FullState(AppState),
}

impl AppUpdate {
    pub fn rev(&self) -> u64 {
        match self {
            AppUpdate::FullState(s) => s.rev,
        }
    }
}

#[derive(Debug)]
pub(crate) enum CoreMsg {
    Action(AppAction),
    Internal(Box<InternalEvent>),
}

/// Results of spawned provider/contract calls and forwarded provider events,
/// delivered back into the actor mailbox.
#[derive(Debug)]
pub(crate) enum InternalEvent {
    // Async results
    ConnectFinished {
        result: Result<Vec<String>, ProviderError>,
    },
    /// Silent session re-derivation (`Foregrounded`): accounts already
    /// authorized for this page, queried without prompting.
    SessionRestored {
        accounts: Vec<String>,
    },
    ChainFetched {
        chain_id: Option<String>,
        refresh_if_correct: bool,
    },
    SwitchNetworkFinished {
        result: Result<(), SwitchNetworkError>,
    },
    MessagesFetched {
        result: Result<Vec<WallMessage>, ProviderError>,
    },
    SendFinished {
        result: Result<(), ProviderError>,
    },

    // Unsolicited provider events
    ProviderAccountsChanged {
        accounts: Vec<String>,
    },
    ProviderChainChanged {
        chain_id: String,
    },
}
