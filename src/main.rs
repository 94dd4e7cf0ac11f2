use recipe_service::config::RecipeConfig;
use recipe_service::observability::init_tracing;
use recipe_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("recipe-service", "info");

    let config = RecipeConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
