//! Capabilities the host provides to the core.

use core::future::Future;
use core::time::Duration;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Server acknowledgement.
    Success,
    /// Server refused the action.
    Rejected,
    /// Server could not be reached.
    Unreachable,
    /// Blocking dialog.
    Alert,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub const UNREACHABLE: &'static str = "Le serveur est injoignable, réessayez plus tard.";

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn rejected(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Rejected,
            text: text.into(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            level: NoticeLevel::Unreachable,
            text: Self::UNREACHABLE.to_string(),
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Alert,
            text: text.into(),
        }
    }
}

/// Rendering surface. The core never touches the display any other way.
pub trait ViewPort {
    /// Replaces the set of controls that currently accept input.
    fn set_enabled_controls(&mut self, controls: Controls);
    fn set_countdown(&mut self, gate: Gate, text: &str);
    fn set_team_highlight(&mut self, team: Team, highlighted: bool);
    fn notify(&mut self, notice: Notice);
    fn clear_grid(&mut self);
    fn render_grid(&mut self, grid: &GridSnapshot);
    fn render_activity(&mut self, records: &[PlayerRecord]);
}

/// Source of repeating ticks.
///
/// The host delivers every tick of `ticket` back through [`PixelClient::tick`] (or
/// [`CooldownController::tick`]) until the returned handle is dropped. Dropping the
/// handle must cancel the timer.
pub trait Scheduler {
    type Handle;

    fn start(&mut self, ticket: Ticket, period: Duration) -> Self::Handle;
}

/// Durable flat string storage that survives reloads.
pub trait Preferences {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
    fn forget(&mut self, key: &str);
}

/// Remote operations of the pixel API.
pub trait BackendClient {
    fn get_grid(&self) -> impl Future<Output = BackendResult<GridSnapshot>>;
    fn get_player_activity(
        &self,
        uid: &str,
    ) -> impl Future<Output = BackendResult<Vec<PlayerRecord>>>;
    fn set_team(&self, uid: &Uid, team: Team) -> impl Future<Output = BackendResult<Ack>>;
    fn set_pixel(&self, edit: &PixelEdit) -> impl Future<Output = BackendResult<Ack>>;
}

/// Successful response to a mutating call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

/// In-memory [`Preferences`], for hosts without durable storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryPreferences {
    values: std::collections::BTreeMap<String, String>,
}

impl Preferences for MemoryPreferences {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn forget(&mut self, key: &str) {
        self.values.remove(key);
    }
}
