use crate::error::plural;
use crate::session::Session;
use serde::Serialize;

pub const EMPTY_LIST_PROMPT: &str = "Please add ingredients to get a recipe!";
pub const LOADING_MESSAGE: &str = "Chef Claude is cooking up a recipe...";

/// Immutable snapshot of everything a front end needs to draw a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub ingredients: Vec<String>,
    pub draft: String,
    /// False while the trimmed draft is empty
    pub can_submit: bool,
    pub can_generate: bool,
    pub generate_label: String,
    pub clear_label: String,
    /// Present while the list is below the minimum
    pub hint: Option<String>,
    /// Present while the list is empty
    pub empty_prompt: Option<String>,
    pub loading: bool,
    pub loading_message: Option<String>,
    /// Only while a recipe is the current result
    pub recipe: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let count = session.ingredients().len();
        let missing = session.missing();
        let loading = session.state().is_loading();

        SessionView {
            ingredients: session.ingredients().to_vec(),
            draft: session.draft().to_string(),
            can_submit: !session.draft().trim().is_empty(),
            can_generate: session.can_generate(),
            generate_label: generate_label(loading, missing),
            clear_label: format!("Clear List ({})", count),
            hint: (count > 0 && missing > 0).then(|| missing_hint(missing)),
            empty_prompt: (count == 0).then(|| EMPTY_LIST_PROMPT.to_string()),
            loading,
            loading_message: loading.then(|| LOADING_MESSAGE.to_string()),
            recipe: session
                .state()
                .recipe()
                .filter(|_| !loading)
                .map(str::to_string),
            error: session.notices().error.clone(),
            warning: session.notices().warning.clone(),
        }
    }
}

impl Default for SessionView {
    fn default() -> Self {
        SessionView::from(&Session::default())
    }
}

/// Label for the generate control.
pub fn generate_label(loading: bool, missing: usize) -> String {
    if loading {
        "Generating...".to_string()
    } else if missing > 0 {
        format!("Add {} more ingredient{}", missing, plural(&missing))
    } else {
        "Get a Recipe".to_string()
    }
}

pub fn missing_hint(missing: usize) -> String {
    format!(
        "Need {} more ingredient{} to get a recipe.",
        missing,
        plural(&missing)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_labels() {
        assert_eq!(generate_label(true, 3), "Generating...");
        assert_eq!(generate_label(false, 1), "Add 1 more ingredient");
        assert_eq!(generate_label(false, 2), "Add 2 more ingredients");
        assert_eq!(generate_label(false, 0), "Get a Recipe");
        assert_eq!(missing_hint(1), "Need 1 more ingredient to get a recipe.");
    }

    #[test]
    fn test_four_items_disable_generate() {
        let mut session = Session::default();
        session.remove_ingredient("pasta");

        let view = session.view();
        assert_eq!(view.ingredients.len(), 4);
        assert!(!view.can_generate);
        assert_eq!(view.generate_label, "Add 1 more ingredient");
        assert!(view.hint.as_deref().unwrap().contains("1 more"));
        assert_eq!(view.clear_label, "Clear List (4)");
    }

    #[test]
    fn test_empty_list_view() {
        let mut session = Session::default();
        session.clear_ingredients();

        let view = session.view();
        assert_eq!(view.empty_prompt.as_deref(), Some(EMPTY_LIST_PROMPT));
        assert!(view.hint.is_none());
        assert!(!view.can_generate);
    }

    #[test]
    fn test_loading_view_hides_recipe() {
        let mut session = Session::default();
        session.begin_request().unwrap();

        let view = session.view();
        assert!(view.loading);
        assert!(!view.can_generate);
        assert_eq!(view.generate_label, "Generating...");
        assert_eq!(view.loading_message.as_deref(), Some(LOADING_MESSAGE));
        assert!(view.recipe.is_none());
    }

    #[test]
    fn test_draft_controls_submit() {
        let mut session = Session::default();
        assert!(!session.view().can_submit);
        session.set_draft("   ");
        assert!(!session.view().can_submit);
        session.set_draft("thyme");
        assert!(session.view().can_submit);
    }

    #[test]
    fn test_view_serializes() {
        let json = serde_json::to_value(SessionView::default()).unwrap();
        assert_eq!(json["ingredients"].as_array().unwrap().len(), 5);
        assert_eq!(json["generate_label"], "Get a Recipe");
        assert!(json["recipe"].is_null());
    }
}
