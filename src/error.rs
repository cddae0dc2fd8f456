use std::time::Duration;
use thiserror::Error;

/// Reasons an ingredient entry is rejected.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngredientError {
    /// Nothing left after trimming; ignored without a message
    #[error("Ingredient is empty")]
    EmptyInput,

    /// The entry has no alphabetic character at all
    #[error("Ingredient must contain letters.")]
    InvalidCharacters,

    /// The list is already at its maximum size
    #[error("Maximum {max} ingredients allowed. Please clear some.")]
    CapacityExceeded { max: usize },

    /// A case-insensitive match is already in the list
    #[error("Ingredient \"{name}\" is already in your list.")]
    DuplicateIngredient { name: String },
}

impl IngredientError {
    /// Duplicates are reported as warnings, everything else as errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, IngredientError::DuplicateIngredient { .. })
    }

    /// Whether the user should see anything at all.
    pub fn is_silent(&self) -> bool {
        matches!(self, IngredientError::EmptyInput)
    }
}

/// Errors around a recipe request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// Generating with an empty list
    #[error("Please add at least one ingredient!")]
    NoIngredients,

    /// Below the configured minimum
    #[error("Add {} more ingredient{} to get a recipe.", .missing, plural(.missing))]
    TooFewIngredients { missing: usize },

    /// The collaborator call failed; the payload is the logged cause
    #[error("Recipe request failed: {0}")]
    RequestFailed(String),

    /// The collaborator did not answer in time
    #[error("Recipe request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors surfaced by the crate's public entry points
#[derive(Error, Debug)]
pub enum ChefError {
    /// Rejected ingredient
    #[error(transparent)]
    Ingredient(#[from] IngredientError),

    /// Rejected or failed recipe request
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// Provider could not be created or answered with an error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Ingredient limits that no list could satisfy
    #[error("Invalid kitchen limits: {0}")]
    InvalidLimits(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// HTTP transport error
    #[error("Failed to reach provider: {0}")]
    FetchError(#[from] reqwest::Error),
}

pub(crate) fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            IngredientError::CapacityExceeded { max: 10 }.to_string(),
            "Maximum 10 ingredients allowed. Please clear some."
        );
        assert_eq!(
            IngredientError::DuplicateIngredient {
                name: "Tomato".to_string()
            }
            .to_string(),
            "Ingredient \"Tomato\" is already in your list."
        );
        assert_eq!(
            RecipeError::TooFewIngredients { missing: 1 }.to_string(),
            "Add 1 more ingredient to get a recipe."
        );
        assert_eq!(
            RecipeError::TooFewIngredients { missing: 3 }.to_string(),
            "Add 3 more ingredients to get a recipe."
        );
    }

    #[test]
    fn test_severity() {
        assert!(IngredientError::DuplicateIngredient {
            name: "corn".to_string()
        }
        .is_warning());
        assert!(!IngredientError::InvalidCharacters.is_warning());
        assert!(IngredientError::EmptyInput.is_silent());
        assert!(!IngredientError::CapacityExceeded { max: 10 }.is_silent());
    }
}
