use bitflags::bitflags;
use core::time::Duration;

/// Period at which a closed gate counts down.
pub const TICK: Duration = Duration::from_secs(1);

pub const PENALTY_NOTICE: &str =
    "Le temps pour modifier un pixel est écoulé. Veuillez choisir une équipe pour continuer.";

bitflags! {
    /// Groups of controls that can accept input.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Controls: u8 {
        const TEAM  = 1;
        const PIXEL = 1 << 1;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    TeamSwitch,
    PixelEdit,
    /// Expiry resets the session instead of unlocking an action.
    PenaltyReset,
}

impl Gate {
    pub const ALL: [Gate; 3] = [Gate::TeamSwitch, Gate::PixelEdit, Gate::PenaltyReset];
    pub const COUNT: usize = Self::ALL.len();

    pub const fn seconds(self) -> u32 {
        use Gate::*;
        match self {
            TeamSwitch => 10,
            PixelEdit => 15,
            PenaltyReset => 30,
        }
    }

    pub const fn duration(self) -> Duration {
        Duration::from_secs(self.seconds() as u64)
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Controls this gate keeps locked while closed.
    pub const fn controls(self) -> Controls {
        use Gate::*;
        match self {
            TeamSwitch => Controls::TEAM,
            PixelEdit => Controls::PIXEL,
            PenaltyReset => Controls::empty(),
        }
    }

    pub fn countdown_label(self, remaining: u32) -> String {
        use Gate::*;
        match self {
            TeamSwitch => format!("Vous pouvez changer votre équipe dans {remaining}s"),
            PixelEdit => format!("Vous pouvez modifier un pixel dans {remaining}s"),
            PenaltyReset => format!("Réinitialisation de l'équipe dans {remaining}s"),
        }
    }

    pub const fn open_label(self) -> &'static str {
        use Gate::*;
        match self {
            TeamSwitch => "Vous pouvez changer votre équipe",
            PixelEdit => "Vous pouvez modifier un pixel",
            PenaltyReset => "",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateState {
    Open,
    Closed { remaining: u32 },
}

impl GateState {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub const fn remaining(self) -> Option<u32> {
        match self {
            Self::Open => None,
            Self::Closed { remaining } => Some(remaining),
        }
    }
}

/// Identifies one arming of one gate. Ticks carrying an older ticket are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub gate: Gate,
    pub generation: u64,
}
