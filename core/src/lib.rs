pub use activity::*;
pub use call::*;
pub use capability::*;
pub use client::*;
pub use cooldown::*;
pub use error::*;
pub use gate::*;
pub use grid::*;
pub use session::*;
pub use types::*;

pub use pixelwar_protocol::{GridPayload, PlayerRecord};

mod activity;
mod call;
mod capability;
mod client;
mod cooldown;
mod error;
mod gate;
mod grid;
mod session;
mod types;

#[cfg(test)]
mod testkit;
