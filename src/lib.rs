pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;

// UniFFI bindings for mobile platforms (iOS/Android)
pub mod uniffi_bindings;

pub use builder::RecipeClientBuilder;
pub use client::{create_url, RecipeClient};
pub use config::{load_settings, Settings};
pub use error::FetchError;
pub use model::{Ingredient, Recipe, Step};
pub use parser::parse_recipes;

use log::error;

/// Fetch the recipe feed at `request_url` with a default client.
///
/// Every failure is logged and degrades to an empty list.
pub async fn fetch_recipes(request_url: &str) -> Vec<Recipe> {
    match try_fetch_recipes(request_url).await {
        Ok(recipes) => recipes,
        Err(e) => {
            error!("Problem fetching recipes from {request_url}: {e}");
            Vec::new()
        }
    }
}

/// Fetch the recipe feed at `request_url` with a default client, reporting
/// why it failed.
pub async fn try_fetch_recipes(request_url: &str) -> Result<Vec<Recipe>, FetchError> {
    RecipeClient::new()?.try_fetch_recipes(request_url).await
}

/// Blocking variant of [`fetch_recipes`]. Blocks the calling thread until the
/// fetch completes or times out.
pub fn fetch_recipes_blocking(request_url: &str) -> Vec<Recipe> {
    match try_fetch_recipes_blocking(request_url) {
        Ok(recipes) => recipes,
        Err(e) => {
            error!("Problem fetching recipes from {request_url}: {e}");
            Vec::new()
        }
    }
}

/// Blocking variant of [`try_fetch_recipes`].
pub fn try_fetch_recipes_blocking(request_url: &str) -> Result<Vec<Recipe>, FetchError> {
    RecipeClient::new()?.try_fetch_recipes_blocking(request_url)
}
