use std::time::Duration;

use log::{debug, error};
use reqwest::{Client, StatusCode, Url};

use crate::builder::RecipeClientBuilder;
use crate::config::Settings;
use crate::model::Recipe;
use crate::parser::parse_recipes;
use crate::FetchError;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Fetches recipe feeds over HTTP.
///
/// The client keeps no state between calls. Every fetch is a single GET with
/// no retries; the response is owned by the call and released when it returns.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    client: Client,
}

impl RecipeClient {
    /// Client with the default timeouts (15s connect, 10s read)
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    pub fn builder() -> RecipeClientBuilder {
        RecipeClientBuilder::default()
    }

    /// Client configured from loaded [`Settings`]
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let mut builder = Self::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .read_timeout(Duration::from_millis(settings.read_timeout_ms));

        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder.build()
    }

    pub(crate) fn from_http_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and parse the recipe feed at `request_url`.
    ///
    /// `Ok(vec![])` means the server returned an empty list; every failure
    /// is reported as an error instead.
    pub async fn try_fetch_recipes(&self, request_url: &str) -> Result<Vec<Recipe>, FetchError> {
        let url = create_url(request_url)?;
        let body = self.make_http_request(url).await?;
        parse_recipes(&body)
    }

    /// Fetch and parse the recipe feed at `request_url`, degrading every
    /// failure to an empty list.
    ///
    /// An empty result therefore means "no data available", not "zero
    /// recipes". Use [`RecipeClient::try_fetch_recipes`] to tell them apart.
    pub async fn fetch_recipes(&self, request_url: &str) -> Vec<Recipe> {
        match self.try_fetch_recipes(request_url).await {
            Ok(recipes) => recipes,
            Err(e) => {
                error!("Problem fetching recipes from {request_url}: {e}");
                Vec::new()
            }
        }
    }

    /// Blocking variant of [`RecipeClient::try_fetch_recipes`].
    ///
    /// Blocks the calling thread until the fetch completes or times out.
    /// Must not be called from within an async runtime.
    pub fn try_fetch_recipes_blocking(&self, request_url: &str) -> Result<Vec<Recipe>, FetchError> {
        let rt = create_runtime()?;
        rt.block_on(self.try_fetch_recipes(request_url))
    }

    /// Blocking variant of [`RecipeClient::fetch_recipes`].
    ///
    /// Blocks the calling thread until the fetch completes or times out.
    /// Must not be called from within an async runtime.
    pub fn fetch_recipes_blocking(&self, request_url: &str) -> Vec<Recipe> {
        match self.try_fetch_recipes_blocking(request_url) {
            Ok(recipes) => recipes,
            Err(e) => {
                error!("Problem fetching recipes from {request_url}: {e}");
                Vec::new()
            }
        }
    }

    async fn make_http_request(&self, url: Url) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        // Always UTF-8, whatever the Content-Type claims
        let bytes = response.bytes().await?;
        debug!("Read {} bytes", bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Parse `request_url` into an http(s) URL.
///
/// # Errors
/// Returns [`FetchError::MalformedUrl`] for unparseable strings and for
/// schemes other than `http` and `https`.
pub fn create_url(request_url: &str) -> Result<Url, FetchError> {
    let url = Url::parse(request_url).map_err(|e| FetchError::MalformedUrl {
        url: request_url.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::MalformedUrl {
            url: request_url.to_string(),
            reason: format!("unsupported scheme {scheme:?}"),
        }),
    }
}

fn create_runtime() -> Result<tokio::runtime::Runtime, FetchError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const ONE_RECIPE: &str = r#"[{
        "id": 2,
        "name": "Brownies",
        "servings": 8,
        "ingredients": [{"quantity": 350, "measure": "G", "ingredient": "Bittersweet chocolate"}],
        "steps": [{"id": 0, "shortDescription": "Intro", "description": "Intro", "videoURL": ""}]
    }]"#;

    #[test]
    fn test_default_timeouts() {
        assert_eq!(DEFAULT_CONNECT_TIMEOUT, Duration::from_millis(15_000));
        assert_eq!(DEFAULT_READ_TIMEOUT, Duration::from_millis(10_000));
    }

    #[test]
    fn test_create_url() {
        assert!(create_url("https://example.com/baking.json").is_ok());
        assert!(create_url("http://localhost:8080/").is_ok());
    }

    #[test]
    fn test_create_url_malformed() {
        for input in ["", "not a url", "example.com/baking.json", "ftp://example.com/x"] {
            assert!(
                matches!(create_url(input), Err(FetchError::MalformedUrl { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_fetch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/baking.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(ONE_RECIPE)
            .create_async()
            .await;

        let client = RecipeClient::new().unwrap();
        let recipes = client
            .try_fetch_recipes(&format!("{}/baking.json", server.url()))
            .await
            .unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name, "Brownies");
        assert_eq!(recipes[0].ingredients, "• Bittersweet chocolate (350 G)\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/baking.json")
            .with_status(500)
            .with_body(ONE_RECIPE)
            .expect(2)
            .create_async()
            .await;

        let client = RecipeClient::new().unwrap();
        let url = format!("{}/baking.json", server.url());

        let result = client.try_fetch_recipes(&url).await;
        assert!(matches!(result, Err(FetchError::HttpStatus(500))));
        assert!(client.fetch_recipes(&url).await.is_empty());
        mock.assert_async().await;
    }

    #[test]
    fn test_fetch_blocking_malformed_url() {
        let client = RecipeClient::new().unwrap();
        let result = client.try_fetch_recipes_blocking("::nope::");
        assert!(matches!(result, Err(FetchError::MalformedUrl { .. })));
        assert!(client.fetch_recipes_blocking("::nope::").is_empty());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            user_agent: Some("settings-agent".to_string()),
            ..Settings::default()
        };
        assert!(RecipeClient::from_settings(&settings).is_ok());
    }
}
