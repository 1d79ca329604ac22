//! Wire format of the pixel API.
//!
//! Field names follow the server's JSON, the Rust side uses English names and renames.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "https://pixel-api.codenestedu.fr";

/// Grid body returned by `GET /tableau`: rows of color tokens.
pub type GridPayload = Vec<Vec<String>>;

/// Builds every endpoint URL from a server base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn grid(&self) -> String {
        format!("{}/tableau", self.base)
    }

    /// Player list, filtered by the `uid` query parameter.
    pub fn players(&self) -> String {
        format!("{}/liste-joueurs", self.base)
    }

    pub fn choose_team(&self) -> String {
        format!("{}/choisir-equipe", self.base)
    }

    pub fn set_pixel(&self) -> String {
        format!("{}/modifier-case", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

/// Body of `PUT /choisir-equipe`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamChoice {
    pub uid: String,
    #[serde(rename = "nouvelleEquipe")]
    pub team: String,
}

/// Body of `PUT /modifier-case`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelChange {
    pub color: String,
    pub uid: String,
    pub col: usize,
    pub row: usize,
}

/// Envelope the server uses both for acknowledgements and for errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub msg: Option<String>,
}

/// One entry of `GET /liste-joueurs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "equipe")]
    pub team: String,
    /// Kept as sent so it can be rendered verbatim.
    #[serde(rename = "lastModificationPixel", default)]
    pub last_modified_at: Option<String>,
    #[serde(default)]
    pub banned: bool,
    #[serde(rename = "nbPixelsModifies", default)]
    pub edit_count: u32,
}
