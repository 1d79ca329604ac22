use core::fmt;
use core::str::FromStr;

/// Color token as the server sends it, usually `#rrggbb`.
pub type CellColor = String;

/// Row and column of a grid cell.
pub type CellPos = (usize, usize);

/// Teams a player can join.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    Rouge,
    Bleu,
    Vert,
    Jaune,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::Rouge, Team::Bleu, Team::Vert, Team::Jaune];

    /// Token sent to the server and stored in preferences.
    pub const fn token(self) -> &'static str {
        use Team::*;
        match self {
            Rouge => "rouge",
            Bleu => "bleu",
            Vert => "vert",
            Jaune => "jaune",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTeam(pub String);

impl fmt::Display for UnknownTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown team: {:?}", self.0)
    }
}

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Team::ALL
            .into_iter()
            .find(|team| team.token() == s)
            .ok_or_else(|| UnknownTeam(s.to_string()))
    }
}

/// A player token that passed local validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uid(String);

impl Uid {
    /// Length in UTF-16 units, as the server counts it.
    pub const LEN: usize = 8;

    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cell waiting to be bundled with a color into a pixel edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEdit {
    pub pos: CellPos,
}

/// A fully formed pixel mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelEdit {
    pub uid: Uid,
    pub row: usize,
    pub col: usize,
    pub color: CellColor,
}
