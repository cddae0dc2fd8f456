use crate::config::ProviderConfig;
use crate::providers::{build_user_message, RecipeGenerator, CHEF_SYSTEM_PROMPT};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration. No API key needed.
    pub fn new(config: &ProviderConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaProvider {
            client: Client::new(),
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl RecipeGenerator for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn generate_recipe(
        &self,
        ingredients: &[String],
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        // Ollama uses OpenAI-compatible API
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": CHEF_SYSTEM_PROMPT},
                    {"role": "user", "content": build_user_message(ingredients)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        if let Some(error) = response_body.get("error") {
            let error_message = error
                .as_str()
                .unwrap_or_else(|| error["message"].as_str().unwrap_or("Unknown error"));
            return Err(format!("Ollama API error: {}", error_message).into());
        }

        let recipe = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                format!(
                    "Failed to extract content from Ollama response. Response: {}",
                    serde_json::to_string_pretty(&response_body)
                        .unwrap_or_else(|_| response_body.to_string())
                )
            })?
            .to_string();

        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_ollama_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r###"{"choices": [{"message": {"content": "## Corn Chowder"}}]}"###)
            .create_async()
            .await;

        let mut config = ProviderConfig::for_model("llama3.1");
        config.base_url = Some(server.url());
        let provider = OllamaProvider::new(&config).unwrap();

        let recipe = provider
            .generate_recipe(&["corn".to_string(), "heavy cream".to_string()])
            .await
            .unwrap();
        assert_eq!(recipe, "## Corn Chowder");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ollama_unexpected_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let mut config = ProviderConfig::for_model("llama3.1");
        config.base_url = Some(server.url());
        let provider = OllamaProvider::new(&config).unwrap();

        let err = provider
            .generate_recipe(&["corn".to_string()])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to extract content"));
    }

    #[test]
    fn test_default_base_url() {
        let provider = OllamaProvider::new(&ProviderConfig::for_model("llama3.1")).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert_eq!(provider.provider_name(), "ollama");
    }
}
