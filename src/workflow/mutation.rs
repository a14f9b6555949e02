use reqwest::Method;
use serde::Serialize;

use crate::error::ClientError;
use crate::remote::endpoints;
use crate::state::{Form, Status};
use crate::subscriber::StateChange;
use crate::workflow::App;

pub const CODE_LENGTH: usize = 4;

/// Contents of the region creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDraft {
    pub code: String,
    pub name: String,
    pub href: String
}

/// Contents of the municipality creation form. `region` is the dropdown choice, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MunicipalityDraft {
    pub code: String,
    pub name: String,
    pub href: String,
    pub photo_href: String,
    pub region: Option<String>
}

impl RegionDraft {
    pub fn trimmed(&self) -> Self {
        RegionDraft {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            href: self.href.trim().to_string()
        }
    }
}

impl MunicipalityDraft {
    pub fn trimmed(&self) -> Self {
        MunicipalityDraft {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            href: self.href.trim().to_string(),
            photo_href: self.photo_href.trim().to_string(),
            region: self.region.as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CreateRegionRequest<'a> {
    #[serde(rename = "kode")]
    pub code: &'a str,
    #[serde(rename = "navn")]
    pub name: &'a str,
    pub href: &'a str
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct RegionReference<'a> {
    #[serde(rename = "kode")]
    pub code: &'a str
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CreateMunicipalityRequest<'a> {
    #[serde(rename = "kode")]
    pub code: &'a str,
    #[serde(rename = "navn")]
    pub name: &'a str,
    pub href: &'a str,
    #[serde(rename = "hrefPhoto")]
    pub photo_href: &'a str,
    pub region: RegionReference<'a>
}

fn has_code_length(code: &str) -> bool {
    code.chars().count() == CODE_LENGTH
}

/// Checks an already trimmed region draft.
pub fn validate_region(draft: &RegionDraft) -> Result<CreateRegionRequest<'_>, ClientError> {
    if !has_code_length(&draft.code) {
        return Err(ClientError::validation("region code must be exactly 4 characters"));
    }
    if draft.name.is_empty() {
        return Err(ClientError::validation("region name is required"));
    }

    Ok(CreateRegionRequest {
        code: &draft.code,
        name: &draft.name,
        href: &draft.href
    })
}

/// Checks an already trimmed municipality draft against the resolved dropdown region.
pub fn validate_municipality<'a>(
    draft: &'a MunicipalityDraft,
    region: Option<&'a str>
) -> Result<CreateMunicipalityRequest<'a>, ClientError> {
    if !has_code_length(&draft.code) {
        return Err(ClientError::validation("municipality code must be exactly 4 characters"));
    }
    if draft.name.is_empty() {
        return Err(ClientError::validation("municipality name is required"));
    }
    let region = region.ok_or_else(|| ClientError::validation("select a region"))?;

    Ok(CreateMunicipalityRequest {
        code: &draft.code,
        name: &draft.name,
        href: &draft.href,
        photo_href: &draft.photo_href,
        region: RegionReference { code: region }
    })
}

impl App {
    pub(crate) async fn create_region(&mut self, draft: RegionDraft) -> Result<(), ClientError> {
        let draft = draft.trimmed();
        self.state.set_region_form(draft.clone());

        let body = match validate_region(&draft) {
            Ok(request) => serde_json::to_value(&request)?,
            Err(err) => return Err(self.report(Form::Region, err))
        };

        self.state.set_status(Form::Region, Status::pending("Creating region..."));
        self.notify(StateChange::StatusChanged(Form::Region));

        if let Err(err) = self.remote.request(Method::POST, endpoints::CREATE_REGION, Some(body)).await {
            tracing::warn!(region = draft.code.as_str(), "Failed to create region: {}", err);
            return Err(self.report(Form::Region, err));
        }

        tracing::info!(region = draft.code.as_str(), "Created region");
        self.state.set_status(Form::Region, Status::ok(format!("Region created: {}", draft.code)));
        self.state.set_region_form(RegionDraft::default());
        self.notify(StateChange::StatusChanged(Form::Region));

        if let Err(err) = self.reload().await {
            return Err(self.report(Form::Region, err));
        }

        Ok(())
    }

    pub(crate) async fn create_municipality(&mut self, draft: MunicipalityDraft) -> Result<(), ClientError> {
        let draft = draft.trimmed();
        if let Some(code) = &draft.region {
            self.state.choose_creation_region(code);
        }
        self.state.set_municipality_form(draft.clone());

        let target = self.state.creation_region().map(str::to_string);
        let body = match validate_municipality(&draft, target.as_deref()) {
            Ok(request) => serde_json::to_value(&request)?,
            Err(err) => return Err(self.report(Form::Municipality, err))
        };
        // Validation guarantees a target from here on
        let target = target.unwrap_or_default();

        self.state.set_status(Form::Municipality, Status::pending("Creating municipality..."));
        self.notify(StateChange::StatusChanged(Form::Municipality));

        if let Err(err) = self.remote.request(Method::POST, endpoints::CREATE_MUNICIPALITY, Some(body)).await {
            tracing::warn!(municipality = draft.code.as_str(), region = target.as_str(), "Failed to create municipality: {}", err);
            return Err(self.report(Form::Municipality, err));
        }

        tracing::info!(municipality = draft.code.as_str(), region = target.as_str(), "Created municipality");
        self.state.set_status(Form::Municipality, Status::ok(format!("Municipality created: {}", draft.code)));
        self.state.set_municipality_form(MunicipalityDraft::default());
        self.notify(StateChange::StatusChanged(Form::Municipality));

        if let Err(err) = self.reload().await {
            return Err(self.report(Form::Municipality, err));
        }

        self.select_region(&target);
        Ok(())
    }

    /// Puts a failure into the form's status area and hands the error back.
    fn report(&mut self, form: Form, err: ClientError) -> ClientError {
        let message = if err.is_validation() {
            err.to_string()
        } else {
            format!("Error: {}", err)
        };

        self.state.set_status(form, Status::error(message));
        self.notify(StateChange::StatusChanged(form));
        err
    }
}
