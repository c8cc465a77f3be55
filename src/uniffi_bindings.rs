//! UniFFI bindings for baking-time
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Every exported function is blocking and drives its own runtime, so callers
//! must invoke them from a background thread.

use std::fmt;
use std::time::Duration;

use crate::{FetchError, Recipe, RecipeClient, Step};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible recipe structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: String,
    pub name: String,
    pub servings: u32,
    /// Bullet-formatted ingredients, one line each
    pub ingredients: String,
    pub steps: Vec<FfiStep>,
}

/// FFI-compatible step structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStep {
    pub id: String,
    pub short_description: String,
    pub description: String,
    /// Empty string if the step has no video
    pub video_url: String,
}

impl From<Step> for FfiStep {
    fn from(step: Step) -> Self {
        FfiStep {
            id: step.id,
            short_description: step.short_description,
            description: step.description,
            video_url: step.video_url,
        }
    }
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            id: recipe.id,
            name: recipe.name,
            servings: recipe.servings,
            ingredients: recipe.ingredients,
            steps: recipe.steps.into_iter().map(FfiStep::from).collect(),
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiFetchError {
    /// Request URL could not be parsed
    MalformedUrl { message: String },
    /// Connection or timeout failure
    Transport { message: String },
    /// Server answered with a status other than 200
    HttpStatus { code: u16 },
    /// Server sent no data
    EmptyBody,
    /// Response was not a valid recipe document
    Parse { message: String },
    /// Runtime or configuration error
    Internal { message: String },
}

impl fmt::Display for FfiFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiFetchError::MalformedUrl { message } => write!(f, "Malformed URL: {}", message),
            FfiFetchError::Transport { message } => write!(f, "Transport error: {}", message),
            FfiFetchError::HttpStatus { code } => write!(f, "Error response code: {}", code),
            FfiFetchError::EmptyBody => write!(f, "Response body was empty"),
            FfiFetchError::Parse { message } => write!(f, "Parse error: {}", message),
            FfiFetchError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for FfiFetchError {}

impl From<FetchError> for FfiFetchError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::MalformedUrl { .. } => FfiFetchError::MalformedUrl {
                message: err.to_string(),
            },
            FetchError::Transport(e) => FfiFetchError::Transport {
                message: e.to_string(),
            },
            FetchError::HttpStatus(code) => FfiFetchError::HttpStatus { code },
            FetchError::EmptyBody => FfiFetchError::EmptyBody,
            FetchError::Parse(e) => FfiFetchError::Parse {
                message: e.to_string(),
            },
            FetchError::Runtime(e) => FfiFetchError::Internal {
                message: e.to_string(),
            },
            FetchError::Config(e) => FfiFetchError::Internal {
                message: e.to_string(),
            },
        }
    }
}

/// Configuration for fetching recipes
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFetchConfig {
    /// Optional connect timeout in milliseconds (defaults to 15000)
    pub connect_timeout_ms: Option<u64>,
    /// Optional read timeout in milliseconds (defaults to 10000)
    pub read_timeout_ms: Option<u64>,
    /// Optional User-Agent header
    pub user_agent: Option<String>,
}

fn client_from_config(config: Option<FfiFetchConfig>) -> Result<RecipeClient, FetchError> {
    let config = config.unwrap_or_default();
    let mut builder = RecipeClient::builder();

    if let Some(ms) = config.connect_timeout_ms {
        builder = builder.connect_timeout(Duration::from_millis(ms));
    }

    if let Some(ms) = config.read_timeout_ms {
        builder = builder.read_timeout(Duration::from_millis(ms));
    }

    if let Some(user_agent) = config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder.build()
}

/// Fetch recipes from a URL, returning an empty list on any failure
///
/// # Arguments
/// * `url` - The URL of the recipe feed
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn fetch_recipes(url: String) -> Vec<FfiRecipe> {
    crate::fetch_recipes_blocking(&url)
        .into_iter()
        .map(FfiRecipe::from)
        .collect()
}

/// Fetch recipes from a URL, reporting why the fetch failed
///
/// # Arguments
/// * `url` - The URL of the recipe feed
/// * `config` - Optional timeouts and user agent
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn try_fetch_recipes(
    url: String,
    config: Option<FfiFetchConfig>,
) -> Result<Vec<FfiRecipe>, FfiFetchError> {
    let client = client_from_config(config)?;
    let recipes = client.try_fetch_recipes_blocking(&url)?;
    Ok(recipes.into_iter().map(FfiRecipe::from).collect())
}

/// Parse a recipe feed that was downloaded elsewhere
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_recipes_json(json: String) -> Result<Vec<FfiRecipe>, FfiFetchError> {
    let recipes = crate::parse_recipes(&json)?;
    Ok(recipes.into_iter().map(FfiRecipe::from).collect())
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
