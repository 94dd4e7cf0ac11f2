use std::sync::Arc;
use std::time::Duration;

use recipe_service::config::RecipeConfig;
use recipe_service::services::providers::mock::{
    MockImageProvider, MockTextProvider, MockTranslator,
};
use recipe_service::startup::{Application, Providers};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application on a random port with the given collaborators.
    pub async fn spawn(providers: Providers) -> Self {
        std::env::set_var("ENVIRONMENT", "test");
        std::env::set_var("APP__PORT", "0");
        std::env::set_var("GOOGLE_API_KEY", "test-api-key");
        std::env::set_var("IMAGEN_PROJECT_ID", "test-project");

        let config = RecipeConfig::load().expect("Failed to load configuration");
        let app = Application::with_providers(config, providers)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let address = format!("http://127.0.0.1:{}", port);

        // Wait for the server to accept connections.
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp { address, client }
    }
}

/// Providers built from owned mocks.
pub fn mock_providers(
    text: MockTextProvider,
    translator: MockTranslator,
    image: MockImageProvider,
) -> Providers {
    Providers {
        text: Arc::new(text),
        translator: Arc::new(translator),
        image: Arc::new(image),
    }
}
