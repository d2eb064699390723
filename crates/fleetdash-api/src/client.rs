//! HTTP implementation of [`TelemetrySource`]

use std::time::Duration;

use fleetdash_core::prelude::*;
use fleetdash_core::{AuxLists, MachineDetail, MachineRoster, ServerSummary};
use serde::de::DeserializeOwned;

use crate::encode::encode_machine_name;
use crate::source::TelemetrySource;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const ROSTER_PATH: &str = "/machines/get/all/";
const DETAIL_PATH: &str = "/machines/get/";
const AUX_LISTS_PATH: &str = "/machines/get/scripts/";
const SERVER_SUMMARY_PATH: &str = "/srv/get/";

/// Client for the monitoring API rooted at `base_url` (e.g. `http://host:8080/api`)
#[derive(Debug, Clone)]
pub struct HttpTelemetryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTelemetryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::network(&base_url, e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn detail_url(&self, name: &str) -> String {
        format!(
            "{}{}?name={}",
            self.base_url,
            DETAIL_PATH,
            encode_machine_name(name)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(&url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(&url, e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| Error::parse(&url, e.to_string()))
    }
}

impl TelemetrySource for HttpTelemetryClient {
    async fn fetch_roster(&self) -> Result<MachineRoster> {
        self.get_json(self.url(ROSTER_PATH)).await
    }

    async fn fetch_machine_detail(&self, name: &str) -> Result<MachineDetail> {
        let mut detail: MachineDetail = self.get_json(self.detail_url(name)).await?;
        if detail.name.is_empty() {
            detail.name = name.to_string();
        }
        Ok(detail)
    }

    async fn fetch_aux_lists(&self) -> Result<AuxLists> {
        self.get_json(self.url(AUX_LISTS_PATH)).await
    }

    async fn fetch_server_summary(&self) -> Result<ServerSummary> {
        self.get_json(self.url(SERVER_SUMMARY_PATH)).await
    }
}
