use crate::error::IngredientError;
use serde::Serialize;

/// Shown when the collaborator call fails for any reason.
pub const REQUEST_FAILED_MESSAGE: &str =
    "An error occurred while fetching the recipe. Check your connection or try again later.";

/// Lifecycle of the single recipe request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    /// Recipe markdown, passed through untouched
    Succeeded(String),
    /// User-facing failure message
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn recipe(&self) -> Option<&str> {
        match self {
            RequestState::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Idle -> Loading. `None` when a request is already running.
    pub fn begin(&self) -> Option<RequestState> {
        if self.is_loading() {
            None
        } else {
            Some(RequestState::Loading)
        }
    }

    /// Loading -> Succeeded | Failed
    pub fn resolve<E>(outcome: Result<String, E>) -> RequestState {
        match outcome {
            Ok(recipe) => RequestState::Succeeded(recipe),
            Err(_) => RequestState::Failed(REQUEST_FAILED_MESSAGE.to_string()),
        }
    }
}

/// The one error and one warning currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl Notices {
    pub fn clear(&mut self) {
        self.error = None;
        self.warning = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Route a rejected ingredient to the matching slot.
    pub fn report(&mut self, err: &IngredientError) {
        if err.is_silent() {
            return;
        }
        if err.is_warning() {
            self.warning = Some(err.to_string());
        } else {
            self.error = Some(err.to_string());
        }
    }
}
