use thiserror::Error;

/// Rejections decided before any request leaves the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocalValidationError {
    #[error("Veuillez saisir un UID pour modifier un pixel.")]
    MissingUid,
    #[error("Votre UID n'est pas connu pour le serveur.")]
    UnknownUid,
    #[error("Veuillez patienter {remaining}s avant de changer d'équipe.")]
    TeamCooldown { remaining: u32 },
    #[error("Veuillez patienter {remaining}s avant de modifier un pixel.")]
    PixelCooldown { remaining: u32 },
    #[error("Veuillez patienter {remaining}s, les actions sont bloquées après un changement d'équipe.")]
    ActionsSuspended { remaining: u32 },
    #[error("Aucune case sélectionnée.")]
    NoCellSelected,
    #[error("La case ({row}, {col}) n'existe pas.")]
    OutOfBounds { row: usize, col: usize },
}

/// Failures reported by a [`BackendClient`](crate::BackendClient).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Well-formed error response, `message` is what the server said.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// No usable response at all.
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type BackendResult<T> = core::result::Result<T, BackendError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid rows do not all have the same length")]
    InvalidShape,
    #[error("Invalid coordinates")]
    InvalidCoords,
}
