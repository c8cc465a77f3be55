use std::time::Duration;

use reqwest::Client;

use crate::client::{RecipeClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use crate::FetchError;

/// Builder for configuring a [`RecipeClient`]
#[derive(Debug, Default)]
pub struct RecipeClientBuilder {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RecipeClientBuilder {
    /// Set how long to wait for the connection to be established
    ///
    /// Defaults to 15 seconds.
    ///
    /// # Example
    /// ```
    /// use baking_time::RecipeClient;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeClient::builder()
    ///     .connect_timeout(Duration::from_secs(5));
    /// ```
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set how long a single read of the response may stall
    ///
    /// Defaults to 10 seconds. The timer restarts after every successful read.
    ///
    /// # Example
    /// ```
    /// use baking_time::RecipeClient;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeClient::builder()
    ///     .read_timeout(Duration::from_secs(30));
    /// ```
    pub fn read_timeout(mut self, duration: Duration) -> Self {
        self.read_timeout = Some(duration);
        self
    }

    /// Override the `User-Agent` header sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns [`FetchError::Transport`] if the TLS backend cannot be initialised.
    ///
    /// # Example
    /// ```
    /// use baking_time::RecipeClient;
    ///
    /// let client = RecipeClient::builder()
    ///     .user_agent("my-app/1.0")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn build(self) -> Result<RecipeClient, FetchError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("baking-time/{}", env!("CARGO_PKG_VERSION")));

        let client = Client::builder()
            .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
            .read_timeout(self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT))
            .user_agent(user_agent)
            .build()?;

        Ok(RecipeClient::from_http_client(client))
    }
}
