use std::str::FromStr;
use std::time::Duration;

use bitcoin::Txid;
use log::{debug, error, info};
use reqwest::blocking::Client;
use thiserror::Error;

use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid Txid: {0}")]
    InvalidTxid(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned HTTP status: {0}")]
    Status(reqwest::StatusCode),
    #[error("API returned an empty body for {0}")]
    EmptyBody(Txid),
}

/// Block-explorer client returning raw transaction hex by txid.
pub struct MempoolClient {
    client: Client,
    base_url: String,
}

impl MempoolClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn tx_hex_url(&self, txid: &Txid) -> String {
        format!("{}/tx/{}/hex", self.base_url, txid)
    }

    /// Fetches the raw hex of `txid`.
    pub fn fetch_tx_hex(&self, txid: &str) -> Result<String, FetchError> {
        let txid = parse_txid(txid)?;
        let url = self.tx_hex_url(&txid);
        info!("Fetching transaction {} from {}", txid, self.base_url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            error!("Fetching {} failed with status {}", url, response.status());
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text()?.trim().to_string();
        if body.is_empty() {
            return Err(FetchError::EmptyBody(txid));
        }
        debug!("Fetched {} hex characters for {}", body.len(), txid);
        Ok(body)
    }
}

pub fn parse_txid(txid: &str) -> Result<Txid, FetchError> {
    let txid = txid.trim();
    Txid::from_str(txid).map_err(|e| {
        error!("Failed to parse txid: {}", txid);
        FetchError::InvalidTxid(e.to_string())
    })
}
