use reqwest::Method;

use crate::dataset::Snapshot;
use crate::error::ClientError;
use crate::remote::endpoints;
use crate::state::{Form, Status};
use crate::subscriber::StateChange;
use crate::workflow::App;

impl App {
    /// Fetches a fresh snapshot, trying the legacy listing once if the primary one fails.
    ///
    /// On total failure every view switches to the error state and the second
    /// error is returned.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        let response = match self.remote.request(Method::GET, endpoints::REGIONS_PRIMARY, None).await {
            Ok(response) => response,
            Err(primary_err) => {
                tracing::warn!("Listing {} failed ({}), falling back to {}", endpoints::REGIONS_PRIMARY, primary_err, endpoints::REGIONS_FALLBACK);

                match self.remote.request(Method::GET, endpoints::REGIONS_FALLBACK, None).await {
                    Ok(response) => response,
                    Err(err) => {
                        tracing::error!("Failed to load regions: {}", err);
                        self.state.record_load_failure(err.to_string());
                        self.notify(StateChange::LoadFailed);
                        return Err(err);
                    }
                }
            }
        };

        let snapshot = Snapshot::from_response(response);
        tracing::info!(
            regions = snapshot.regions.len(),
            municipalities = snapshot.municipality_count(),
            "Replaced dataset snapshot"
        );

        self.state.replace_snapshot(snapshot);
        if let Some(code) = self.state.selection() {
            if self.state.active_region().is_none() {
                tracing::info!(region = code, "Selected region disappeared from the dataset");
            }
        }
        self.notify(StateChange::DatasetReplaced);

        Ok(())
    }

    /// The user-triggered reload, which also reports progress in the region form.
    pub(crate) async fn reload_command(&mut self) -> Result<(), ClientError> {
        self.state.set_status(Form::Region, Status::pending("Loading data..."));
        self.state.set_status(Form::Municipality, Status::default());
        self.notify(StateChange::StatusChanged(Form::Region));
        self.notify(StateChange::StatusChanged(Form::Municipality));

        let result = self.reload().await;
        let status = match &result {
            Ok(()) => Status::ok("Data reloaded."),
            Err(err) => Status::error(format!("Error: {}", err))
        };
        self.state.set_status(Form::Region, status);
        self.notify(StateChange::StatusChanged(Form::Region));

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::state::StatusKind;
    use crate::testing::{remote_error, FakeRemote};
    use crate::views::{self, DetailView, ListView};
    use serde_json::json;

    #[tokio::test]
    async fn primary_listing_is_used_when_it_works() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Ok(json!([{"kode": "1084"}])));
        let calls = remote.calls();
        let mut app = App::new(Box::new(remote));

        app.reload().await.unwrap();

        assert_eq!(app.state().snapshot().map(|s| s.regions.len()), Some(1));
        assert_eq!(calls.paths(), vec!["GET /regioner"]);
    }

    #[tokio::test]
    async fn fallback_listing_is_transparent() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Err(remote_error(404)))
            .respond(Method::GET, "/region", Ok(json!([{"kode": "1085", "kommuner": [{"kode": "0253"}]}])));
        let calls = remote.calls();
        let mut app = App::new(Box::new(remote));

        app.reload().await.unwrap();

        let snapshot = app.state().snapshot().unwrap();
        assert_eq!(snapshot.regions[0].code, "1085");
        assert_eq!(snapshot.municipality_count(), 1);
        assert_eq!(calls.paths(), vec!["GET /regioner", "GET /region"]);
    }

    #[tokio::test]
    async fn total_failure_marks_every_view_and_returns_the_second_error() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Ok(json!([{"kode": "1084"}])))
            .respond(Method::GET, "/regioner", Err(remote_error(500)))
            .respond(Method::GET, "/region", Err(remote_error(503)));
        let calls = remote.calls();
        let mut app = App::new(Box::new(remote));
        app.reload().await.unwrap();
        app.select_region("1084");

        let err = app.reload().await.unwrap_err();

        assert!(matches!(err, ClientError::Remote { status: 503, .. }));
        assert_eq!(calls.len(), 3);
        let state = app.state();
        assert!(state.snapshot().is_none());
        assert!(views::master_list(state).is_failed());
        assert!(views::region_overview(state).is_failed());
        assert!(views::flat_municipalities(state).is_failed());
        assert!(matches!(views::detail(state), DetailView::Failed(_)));
    }

    #[tokio::test]
    async fn non_array_listing_is_an_empty_dataset() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Ok(json!({"kode": "1084", "navn": "Hovedstaden"})));
        let mut app = App::new(Box::new(remote));

        app.reload().await.unwrap();

        assert_eq!(views::master_list(app.state()), ListView::Empty);
        assert!(app.state().load_error().is_none());
    }

    #[tokio::test]
    async fn vanished_selection_shows_not_found() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Ok(json!([{"kode": "0101", "kommuner": [{"kode": "1001"}]}])))
            .respond(Method::GET, "/regioner", Ok(json!([{"kode": "0202"}])));
        let mut app = App::new(Box::new(remote));
        app.reload().await.unwrap();
        app.select_region("0101");
        assert!(matches!(views::detail(app.state()), DetailView::Region { code: "0101", .. }));

        app.reload().await.unwrap();

        assert_eq!(views::detail(app.state()), DetailView::NotFound { code: "0101" });
    }

    #[tokio::test]
    async fn recovery_after_failure_clears_the_error_state() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Err(remote_error(500)))
            .respond(Method::GET, "/region", Err(remote_error(500)))
            .respond(Method::GET, "/regioner", Ok(json!([{"kode": "1084"}])));
        let mut app = App::new(Box::new(remote));

        assert!(app.reload().await.is_err());
        app.reload().await.unwrap();

        assert!(app.state().load_error().is_none());
        assert_eq!(views::master_list(app.state()).len(), 1);
    }

    #[tokio::test]
    async fn reload_command_reports_in_the_region_status_area() {
        let remote = FakeRemote::new()
            .respond(Method::GET, "/regioner", Ok(json!([])))
            .respond(Method::GET, "/regioner", Err(ClientError::transport("connection refused")))
            .respond(Method::GET, "/region", Err(ClientError::transport("connection refused")));
        let mut app = App::new(Box::new(remote));

        app.dispatch(Command::Reload).await.unwrap();
        assert_eq!(app.state().status(Form::Region), &Status::ok("Data reloaded."));

        assert!(app.dispatch(Command::Reload).await.is_err());
        let status = app.state().status(Form::Region);
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Error: Failed to reach the API: connection refused");
    }
}
