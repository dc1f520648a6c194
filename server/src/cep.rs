use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CepLookupError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("viacep request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("viacep returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Address returned by ViaCEP for a valid postal code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}

#[derive(Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(flatten)]
    address: Address,
}

#[derive(Clone, Debug)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CepLookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CepLookupError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `cep` must already be normalized to 8 digits. `None` when ViaCEP flags it unknown.
    pub async fn lookup(&self, cep: &str) -> Result<Option<Address>, CepLookupError> {
        let url = format!("{}/{cep}/json/", self.base_url);
        debug!(%url, "querying viacep");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CepLookupError::Status(status));
        }
        let body: ViaCepResponse = response.json().await?;
        if body.erro.is_some_and(|flag| flag != serde_json::Value::Bool(false)) {
            return Ok(None);
        }
        Ok(Some(body.address))
    }
}
