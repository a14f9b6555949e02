pub mod load;
pub mod mutation;

use crate::commands::Command;
use crate::error::ClientError;
use crate::remote::RemoteAccess;
use crate::state::AppState;
use crate::subscriber::{StateChange, Subscriber};

/// Owns the state and applies commands to it, one at a time.
///
/// Commands take `&mut self`, so a second command can only start once the
/// previous one has finished, network waits included.
pub struct App {
    remote: Box<dyn RemoteAccess>,
    state: AppState,
    subscribers: Vec<Box<dyn Subscriber>>
}

impl App {
    pub fn new(remote: Box<dyn RemoteAccess>) -> Self {
        App {
            remote,
            state: AppState::new(),
            subscribers: Vec::new()
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) {
        self.subscribers.push(subscriber);
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<(), ClientError> {
        tracing::debug!(?command, "dispatching command");

        match command {
            Command::Reload => self.reload_command().await,
            Command::SelectRegion(code) => {
                self.select_region(&code);
                Ok(())
            }
            Command::CreateRegion(draft) => self.create_region(draft).await,
            Command::CreateMunicipality(draft) => self.create_municipality(draft).await
        }
    }

    pub fn select_region(&mut self, code: &str) {
        self.state.select_region(code);
        if self.state.active_region().is_none() {
            tracing::debug!(region = code, "selected region is not in the current snapshot");
        }
        self.notify(StateChange::SelectionChanged);
    }

    fn notify(&mut self, change: StateChange) {
        for subscriber in &mut self.subscribers {
            subscriber.notify(&change, &self.state);
        }
    }
}
