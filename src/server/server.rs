//! HTTP server core implementation

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer as ActixHttpServer};
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server from loaded configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.server.clone(),
            state: AppState::new(config.clone())?,
        })
    }

    /// Bind and run until shutdown
    pub async fn start(self) -> Result<()> {
        let host = self.config.host.clone();
        let port = self.config.port;
        let state = web::Data::new(self.state);

        info!("Server starting at http://{}:{}", host, port);

        ActixHttpServer::new(move || {
            // Any origin; preflight (OPTIONS) is answered by the middleware.
            let cors = Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
                .max_age(86400);

            App::new()
                .app_data(state.clone())
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .configure(routes::ai::configure)
                .route("/health", web::get().to(routes::health::health_check))
        })
        .bind((host.as_str(), port))
        .map_err(|e| GatewayError::Config(format!("Failed to bind {}:{}: {}", host, port, e)))?
        .run()
        .await
        .map_err(|e| GatewayError::Internal(format!("Server error: {}", e)))
    }
}
