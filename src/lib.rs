//! Keep a short list of the ingredients on hand and ask a language model
//! what to cook with them.
//!
//! The [`Session`] holds the validated ingredient list and the lifecycle of
//! the single recipe request. [`RecipeController`] drives it from async code
//! and publishes a [`SessionView`] after every change.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pantry_chef::{Kitchen, LlmProvider};
//!
//! let kitchen = Kitchen::builder()
//!     .provider(LlmProvider::Anthropic)
//!     .api_key("your-api-key")
//!     .build()?;
//!
//! kitchen.add_ingredient("tomato").await?;
//! kitchen.request_recipe().await?;
//! if let Some(recipe) = kitchen.view().await.recipe {
//!     println!("{}", recipe);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod ingredients;
pub mod providers;
pub mod session;
pub mod state;
pub mod view;

pub use builder::{Kitchen, KitchenBuilder, LlmProvider};
pub use config::{ChefConfig, KitchenConfig, ProviderConfig};
pub use controller::RecipeController;
pub use error::{ChefError, IngredientError, RecipeError};
pub use ingredients::IngredientList;
pub use providers::RecipeGenerator;
pub use session::{RecipeTicket, RequestOutcome, Session};
pub use state::{Notices, RequestState};
pub use view::SessionView;

use crate::providers::FallbackProvider;

/// One-shot recipe for `ingredients` using the configured providers.
///
/// No session, no list validation; the ingredients are sent as given.
pub async fn generate_recipe(ingredients: &[String]) -> Result<String, ChefError> {
    if ingredients.is_empty() {
        return Err(RecipeError::NoIngredients.into());
    }

    let config = ChefConfig::load()?;
    let provider =
        FallbackProvider::new(&config).map_err(|e| ChefError::ProviderError(e.to_string()))?;

    tokio::time::timeout(config.timeout(), provider.generate_recipe(ingredients))
        .await
        .map_err(|_| RecipeError::Timeout(config.timeout()))?
        .map_err(|e| ChefError::ProviderError(e.to_string()))
}
