//! Application startup and lifecycle management.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::RecipeConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::imagen::{ImagenConfig, VertexImagenProvider};
use crate::services::providers::translate::{GoogleTranslator, TranslateConfig};
use crate::services::providers::{ImageProvider, TextProvider, Translator};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: RecipeConfig,
    pub text_provider: Arc<dyn TextProvider>,
    pub translator: Arc<dyn Translator>,
    pub image_provider: Arc<dyn ImageProvider>,
}

/// External collaborators injected into the application.
pub struct Providers {
    pub text: Arc<dyn TextProvider>,
    pub translator: Arc<dyn Translator>,
    pub image: Arc<dyn ImageProvider>,
}

impl Providers {
    /// Production providers built from configuration.
    pub fn from_config(config: &RecipeConfig) -> Self {
        let text: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
        }));

        let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(TranslateConfig {
            api_key: config.google.api_key.clone(),
            target_language: config.translation.target_language.clone(),
        }));

        let image: Arc<dyn ImageProvider> = Arc::new(VertexImagenProvider::new(ImagenConfig {
            api_key: config.google.api_key.clone(),
            project_id: config.imagen.project_id.clone(),
            location: config.imagen.location.clone(),
            model: config.imagen.model.clone(),
        }));

        Self {
            text,
            translator,
            image,
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with production providers.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let providers = Providers::from_config(&config);
        Self::with_providers(config, providers).await
    }

    /// Build with explicit collaborators; tests inject mocks here.
    pub async fn with_providers(
        config: RecipeConfig,
        providers: Providers,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            text_provider: providers.text,
            translator: providers.translator,
            image_provider: providers.image,
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            model = %config.models.text_model,
            "Recipe service listening on port {}",
            port
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = app_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Build the HTTP router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/ingredients/detect",
            post(handlers::ingredients::detect_ingredients),
        )
        .route(
            "/recipes/generate",
            post(handlers::recipes::generate_recipe),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
