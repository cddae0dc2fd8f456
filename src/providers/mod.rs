mod anthropic;
mod factory;
mod fallback;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_message, CHEF_SYSTEM_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// The external recipe-generation capability.
///
/// Implementations receive the full ingredient list in order and return the
/// recipe as markdown. The text is treated as opaque by the caller.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Ask for a recipe that uses some or all of `ingredients`
    async fn generate_recipe(
        &self,
        ingredients: &[String],
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}
