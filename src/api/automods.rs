use std::env;

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, StatusCode,
};

use crate::structs::request::ModpackRequest;

const API_URL: &str = "https://corolitic-hattie-pseudoeconomically.ngrok-free.dev";

/// Failures talking to the automods service, split so callers can tell
/// a rejected request apart from never reaching the service at all.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("the automods service answered with status {0}")]
    Status(StatusCode),

    #[error("could not reach the automods service, {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct AutomodsApi {
    client: Client,
    base_url: String,
}

impl AutomodsApi {
    pub fn default() -> Self {
        let base_url = env::var("AUTOMODS_API_URL").unwrap_or(API_URL.into());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", HeaderValue::from_str(&format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))).unwrap());

        AutomodsApi {
            client: Client::builder().default_headers(headers).build().unwrap(),
            base_url: base_url.into(),
        }
    }

    /// Game versions the service can build a modpack for, in server order.
    pub async fn game_versions(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("/game-versions").await
    }

    /// Mod loaders the service can build a modpack for, in server order.
    pub async fn loader_versions(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("/loader-versions").await
    }

    async fn get_list(&self, path: &str) -> Result<Vec<String>, ApiError> {
        let res = self.client.get(format!("{}{path}", self.base_url)).send().await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()));
        }

        Ok(res.json().await?)
    }

    /// Asks the service to build a modpack, returning the raw archive bytes.
    /// The response body is treated as opaque, on failure it is ignored entirely.
    pub async fn generate_modpack(&self, request: &ModpackRequest) -> Result<Vec<u8>, ApiError> {
        let res = self.client
            .post(format!("{}/generate_modpack", self.base_url))
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()));
        }

        Ok(res.bytes().await?.to_vec())
    }
}
