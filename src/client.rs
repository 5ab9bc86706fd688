//! HTTP client for the WLED JSON API.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::catalog::CatalogEntry;
use crate::errors::Error;
use crate::payload::StatePatch;
use crate::registry::Device;
use crate::runtime;
use crate::status::{DeviceInfo, DeviceState};

type Result<T> = std::result::Result<T, Error>;

/// Operations a fan-out needs from a single WLED device.
///
/// Every method resolves to an explicit [`Result`]: connection failures and
/// timeouts surface as [`Error::DeviceUnreachable`], bad answers as
/// [`Error::DeviceError`]. Nothing is retried.
pub trait WledApi: Send + Sync {
    /// Merge a sparse patch into the device state (`POST /json/state`).
    fn set_state(
        &self,
        device: &Device,
        patch: &StatePatch,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Read the full device state (`GET /json/state`).
    fn get_state(&self, device: &Device) -> impl Future<Output = Result<DeviceState>> + Send;

    /// Read the device description (`GET /json/info`).
    fn get_info(&self, device: &Device) -> impl Future<Output = Result<DeviceInfo>> + Send;

    /// Effects the device reports (`GET /json/effects`).
    fn effects(&self, device: &Device) -> impl Future<Output = Result<Vec<CatalogEntry>>> + Send;

    /// Palettes the device reports (`GET /json/palettes`).
    fn palettes(&self, device: &Device)
    -> impl Future<Output = Result<Vec<CatalogEntry>>> + Send;
}

/// [`WledApi`] over HTTP.
///
/// Each call is bounded by its own timeout; one slow device never delays or
/// cancels calls to another.
#[derive(Debug, Clone)]
pub struct WledClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl WledClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .user_agent(concat!("lightfleet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConfigurationInvalid(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::from_reqwest(http, timeout))
    }

    pub fn from_reqwest(http: reqwest::Client, timeout: Duration) -> Self {
        WledClient { http, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(
        &self,
        device: &Device,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Value> {
        let url = format!("{}{}", device.base_url(), path);
        debug!("{method} {url}");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let call = async {
            let response = request
                .send()
                .await
                .map_err(|e| Error::unreachable(device.id(), e))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::unreachable(device.id(), e))?;
            if !status.is_success() {
                return Err(Error::device(device.id(), format!("HTTP {status}")));
            }
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| Error::device(device.id(), format!("malformed response: {e}")))
        };

        runtime::timeout(self.timeout, call)
            .await
            .map_err(|e| Error::unreachable(device.id(), e))?
    }

    async fn names(&self, device: &Device, path: &str) -> Result<Vec<CatalogEntry>> {
        let value = self.request(device, Method::GET, path, None).await?;
        let names: Vec<String> = serde_json::from_value(value)
            .map_err(|e| Error::device(device.id(), format!("malformed list: {e}")))?;
        Ok(CatalogEntry::from_device_list(&names))
    }
}

impl WledApi for WledClient {
    async fn set_state(&self, device: &Device, patch: &StatePatch) -> Result<()> {
        if !patch.is_valid() {
            return Err(Error::NoAttribute);
        }

        let body = serde_json::to_vec(patch).map_err(Error::JsonDump)?;
        let response = self
            .request(device, Method::POST, "/json/state", Some(body))
            .await?;
        debug!("{} response: {:?}", device.id(), response);

        if let Some(error) = response.get("error") {
            return Err(Error::device(device.id(), error));
        }
        if response.get("success") == Some(&Value::Bool(false)) {
            return Err(Error::device(device.id(), "device rejected the state"));
        }
        Ok(())
    }

    async fn get_state(&self, device: &Device) -> Result<DeviceState> {
        let value = self.request(device, Method::GET, "/json/state", None).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::device(device.id(), format!("malformed state: {e}")))
    }

    async fn get_info(&self, device: &Device) -> Result<DeviceInfo> {
        let value = self.request(device, Method::GET, "/json/info", None).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::device(device.id(), format!("malformed info: {e}")))
    }

    async fn effects(&self, device: &Device) -> Result<Vec<CatalogEntry>> {
        self.names(device, "/json/effects").await
    }

    async fn palettes(&self, device: &Device) -> Result<Vec<CatalogEntry>> {
        self.names(device, "/json/palettes").await
    }
}
