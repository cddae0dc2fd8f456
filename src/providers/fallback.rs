use crate::config::ChefConfig;
use crate::providers::{ProviderFactory, RecipeGenerator};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;

pub struct FallbackProvider {
    providers: Vec<Box<dyn RecipeGenerator>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Create a new fallback provider from configuration
    pub fn new(config: &ChefConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if !config.fallback.enabled {
            // If fallback is disabled, just use the default provider
            let default_provider = ProviderFactory::get_default_provider(config)?;
            return Ok(FallbackProvider {
                providers: vec![default_provider],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let mut providers = Vec::new();

        // Create providers in fallback order
        for provider_name in &config.fallback.order {
            if let Some(provider_config) = config.providers.get(provider_name) {
                if provider_config.enabled {
                    match ProviderFactory::create(provider_name, provider_config) {
                        Ok(provider) => {
                            info!("Added '{}' to fallback chain", provider_name);
                            providers.push(provider);
                        }
                        Err(e) => {
                            warn!("Failed to initialize provider '{}': {}", provider_name, e);
                        }
                    }
                }
            } else {
                warn!(
                    "Provider '{}' in fallback order not found in configuration",
                    provider_name
                );
            }
        }

        Self::from_providers(
            providers,
            config.fallback.retry_attempts,
            config.fallback.retry_delay_ms,
        )
    }

    /// Build a chain from already constructed providers
    pub fn from_providers(
        providers: Vec<Box<dyn RecipeGenerator>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if providers.is_empty() {
            return Err("No providers available in fallback configuration".into());
        }

        Ok(FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        })
    }

    /// Try a provider, backing off a little longer after each failed attempt
    async fn try_provider_with_retry(
        &self,
        provider: &dyn RecipeGenerator,
        ingredients: &[String],
    ) -> Result<String, String> {
        let mut last_error = String::new();

        for attempt in 1..=self.retry_attempts {
            debug!(
                "Requesting recipe from {} (attempt {}/{})",
                provider.provider_name(),
                attempt,
                self.retry_attempts
            );

            match provider.generate_recipe(ingredients).await {
                Ok(recipe) => {
                    info!("Received recipe from {}", provider.provider_name());
                    return Ok(recipe);
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        provider.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.retry_attempts {
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(last_error)
    }
}

#[async_trait]
impl RecipeGenerator for FallbackProvider {
    fn provider_name(&self) -> &str {
        "fallback"
    }

    async fn generate_recipe(
        &self,
        ingredients: &[String],
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let mut all_errors: Vec<String> = Vec::new();

        for provider in &self.providers {
            match self
                .try_provider_with_retry(provider.as_ref(), ingredients)
                .await
            {
                Ok(recipe) => return Ok(recipe),
                Err(e) => {
                    all_errors.push(format!("{}: {}", provider.provider_name(), e));
                }
            }
        }

        Err(format!("All providers failed:\n{}", all_errors.join("\n")).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackConfig, ProviderConfig};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct Flaky {
        name: &'static str,
        failures_left: AtomicU32,
        calls: Arc<AtomicU32>,
    }

    impl Flaky {
        fn new(name: &'static str, failures: u32, calls: Arc<AtomicU32>) -> Self {
            Flaky {
                name,
                failures_left: AtomicU32::new(failures),
                calls,
            }
        }
    }

    #[async_trait]
    impl RecipeGenerator for Flaky {
        fn provider_name(&self) -> &str {
            self.name
        }

        async fn generate_recipe(
            &self,
            _ingredients: &[String],
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(format!("{} is down", self.name).into());
            }
            Ok(format!("## Recipe from {}", self.name))
        }
    }

    fn provider_config(key: &str) -> ProviderConfig {
        let mut config = ProviderConfig::for_model("test-model");
        config.api_key = Some(key.to_string());
        config
    }

    fn create_test_config_with_fallback() -> ChefConfig {
        let mut providers = HashMap::new();
        providers.insert("openai".to_string(), provider_config("test-key"));

        ChefConfig {
            default_provider: "openai".to_string(),
            providers,
            fallback: FallbackConfig {
                enabled: true,
                order: vec!["openai".to_string()],
                retry_attempts: 3,
                retry_delay_ms: 100,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fallback_provider_creation() {
        let config = create_test_config_with_fallback();
        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.provider_name(), "fallback");
        assert_eq!(fallback.providers.len(), 1);
    }

    #[test]
    fn test_fallback_disabled() {
        let mut config = create_test_config_with_fallback();
        config.fallback.enabled = false;

        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 1);
        assert_eq!(fallback.retry_attempts, 1);
    }

    #[test]
    fn test_fallback_no_providers() {
        let mut config = create_test_config_with_fallback();
        config.providers.clear();

        let result = FallbackProvider::new(&config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("No providers available"));
        }
    }

    #[test]
    fn test_fallback_multiple_providers() {
        let mut config = create_test_config_with_fallback();
        config
            .providers
            .insert("anthropic".to_string(), provider_config("test-key-2"));
        config.fallback.order = vec!["openai".to_string(), "anthropic".to_string()];

        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let fallback = FallbackProvider::from_providers(
            vec![Box::new(Flaky::new("primary", 2, calls.clone()))],
            3,
            100,
        )
        .unwrap();

        let recipe = fallback.generate_recipe(&["corn".to_string()]).await.unwrap();
        assert_eq!(recipe, "## Recipe from primary");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_moves_to_next_provider() {
        let primary_calls = Arc::new(AtomicU32::new(0));
        let backup_calls = Arc::new(AtomicU32::new(0));
        let fallback = FallbackProvider::from_providers(
            vec![
                Box::new(Flaky::new("primary", u32::MAX, primary_calls.clone())),
                Box::new(Flaky::new("backup", 0, backup_calls.clone())),
            ],
            2,
            50,
        )
        .unwrap();

        let recipe = fallback.generate_recipe(&["corn".to_string()]).await.unwrap();
        assert_eq!(recipe, "## Recipe from backup");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 2);
        assert_eq!(backup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_providers_fail() {
        let calls = Arc::new(AtomicU32::new(0));
        let fallback = FallbackProvider::from_providers(
            vec![Box::new(Flaky::new("primary", u32::MAX, calls))],
            2,
            10,
        )
        .unwrap();

        let err = fallback
            .generate_recipe(&["corn".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("All providers failed"));
        assert!(err.to_string().contains("primary is down"));
    }
}
