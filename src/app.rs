use crate::{
    config::Config,
    error::Result,
    ml::TfidfVectorizer,
    routes::api_routes,
    services::{Catalog, RecommendationService, SimilarityIndex},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::net::TcpListener;

// Artifact file names produced by the offline preprocessing pipeline.
const PRODUCTS_FILE: &str = "products.json";
const VECTORIZER_FILE: &str = "vectorizer.json";
const NN_MODEL_FILE: &str = "nn_model.json";

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for Docker compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Load the pre-built artifacts before accepting any connections;
        // they stay read-only for the process lifetime.
        let artifacts_dir = self.config.artifacts_dir.as_path();

        let catalog = Catalog::load(&artifacts_dir.join(PRODUCTS_FILE))
            .context("Failed to load the product catalog")?;
        let vectorizer = TfidfVectorizer::load(&artifacts_dir.join(VECTORIZER_FILE))
            .context("Failed to load the fitted vectorizer")?;
        let index = SimilarityIndex::load(&artifacts_dir.join(NN_MODEL_FILE))
            .context("Failed to load the nearest-neighbor index")?;
        info!(
            "Loaded {} products, {} indexed vectors ({} neighbors per query)",
            catalog.len(),
            index.len(),
            index.n_neighbors()
        );

        let recommendation_service =
            web::Data::new(RecommendationService::new(catalog, vectorizer, index));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .configure(api_routes)
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
