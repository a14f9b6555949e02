pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod remote;
pub mod state;
pub mod subscriber;
pub mod views;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::commands::Command;
pub use crate::error::ClientError;
pub use crate::remote::{HttpRemote, RemoteAccess};
pub use crate::state::AppState;
pub use crate::workflow::App;
