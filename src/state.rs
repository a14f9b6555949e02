use crate::dataset::{Region, Snapshot};
use crate::workflow::mutation::{MunicipalityDraft, RegionDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    Region,
    Municipality
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Pending,
    Ok,
    Error
}

/// Short text shown in the status area next to a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String
}

impl Status {
    pub fn pending(message: impl Into<String>) -> Self {
        Status { kind: StatusKind::Pending, message: message.into() }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Status { kind: StatusKind::Ok, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Status { kind: StatusKind::Error, message: message.into() }
    }
}

/// Everything the views are derived from.
///
/// Only the load workflow replaces the snapshot, and only the selection and
/// mutation workflows move the selection.
#[derive(Debug, Default)]
pub struct AppState {
    snapshot: Option<Snapshot>,
    load_error: Option<String>,
    selection: Option<String>,
    creation_region: Option<String>,
    region_status: Status,
    municipality_status: Status,
    region_form: RegionDraft,
    municipality_form: MunicipalityDraft
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, unless the last load failed.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self.load_error {
            Some(_) => None,
            None => self.snapshot.as_ref()
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected region, if it exists in the current snapshot.
    pub fn active_region(&self) -> Option<&Region> {
        let code = self.selection.as_deref()?;
        self.snapshot()?.region(code)
    }

    /// The region chosen in the creation dropdown, if it exists in the current snapshot.
    pub fn creation_region(&self) -> Option<&str> {
        let code = self.creation_region.as_deref()?;
        self.snapshot()?.region(code).map(|r| r.code.as_str())
    }

    pub fn status(&self, form: Form) -> &Status {
        match form {
            Form::Region => &self.region_status,
            Form::Municipality => &self.municipality_status
        }
    }

    pub fn region_form(&self) -> &RegionDraft {
        &self.region_form
    }

    pub fn municipality_form(&self) -> &MunicipalityDraft {
        &self.municipality_form
    }

    pub(crate) fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.load_error = None;
    }

    pub(crate) fn record_load_failure(&mut self, message: String) {
        self.load_error = Some(message);
    }

    pub(crate) fn select_region(&mut self, code: &str) {
        self.selection = Some(code.to_string());
        self.creation_region = Some(code.to_string());
    }

    pub(crate) fn choose_creation_region(&mut self, code: &str) {
        self.creation_region = Some(code.to_string());
    }

    pub(crate) fn set_status(&mut self, form: Form, status: Status) {
        match form {
            Form::Region => self.region_status = status,
            Form::Municipality => self.municipality_status = status
        }
    }

    pub(crate) fn set_region_form(&mut self, draft: RegionDraft) {
        self.region_form = draft;
    }

    pub(crate) fn set_municipality_form(&mut self, draft: MunicipalityDraft) {
        self.municipality_form = draft;
    }
}
