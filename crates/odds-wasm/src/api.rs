//! HTTP clients: public network-data APIs and the dashboard backend.

use odds_core::{Network, NetworkUpdate};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

use crate::error::{DashboardError, Result};
use crate::session::{SessionChannel, SessionEvent, SessionEvents};
use crate::state::to_js;

/// CoinGecko simple price endpoint (no API key required).
pub const COINGECKO_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";

/// mempool.space hashrate response; only the current figures are read.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HashrateStats {
    /// Network hashrate in H/s.
    pub current_hashrate: Option<f64>,
    pub current_difficulty: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct PriceResponse {
    bitcoin: Option<PriceQuote>,
}

#[derive(Deserialize, Debug)]
struct PriceQuote {
    usd: Option<f64>,
}

/// Parse the body of `/v1/mining/hashrate/3d`.
pub fn parse_hashrate_stats(text: &str) -> Result<HashrateStats> {
    serde_json::from_str(text).map_err(|e| DashboardError::parse("hashrate data", e))
}

/// Parse the CoinGecko simple price body into a USD price.
pub fn parse_btc_price(text: &str) -> Result<Option<f64>> {
    let resp: PriceResponse =
        serde_json::from_str(text).map_err(|e| DashboardError::parse("price data", e))?;
    Ok(resp.bitcoin.and_then(|quote| quote.usd))
}

/// Outcome of a network-data refresh. Sources that failed leave their
/// fields empty and add a message to `errors`.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRefresh {
    pub update: NetworkUpdate,
    pub errors: Vec<String>,
}

impl NetworkRefresh {
    /// Combine the per-source results.
    pub fn merge(hashrate: Result<HashrateStats>, price: Result<Option<f64>>) -> Self {
        let mut refresh = NetworkRefresh::default();
        match hashrate {
            Ok(stats) => {
                refresh.update.hashrate_ehs = stats.current_hashrate.map(|hs| hs / 1e18);
                refresh.update.difficulty = stats.current_difficulty;
            }
            Err(e) => refresh.errors.push(format!("Failed to fetch network hashrate: {}", e)),
        }
        match price {
            Ok(price) => refresh.update.btc_price = price,
            Err(e) => refresh.errors.push(format!("Failed to fetch BTC price: {}", e)),
        }
        refresh
    }
}

/// Map an HTTP status to success, an auth failure, or a plain HTTP error.
pub fn check_status(status: u16) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        401 => Err(DashboardError::Unauthorized),
        other => Err(DashboardError::Http(other)),
    }
}

async fn send(url: &str, method: &str, body: Option<&str>, credentials: bool) -> Result<Response> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if credentials {
        opts.set_credentials(RequestCredentials::Include);
    }
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)?;
    if body.is_some() {
        request.headers().set("Content-Type", "application/json")?;
    }

    let window = web_sys::window().ok_or(DashboardError::NoWindow)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    Ok(resp)
}

async fn response_text(resp: &Response) -> Result<String> {
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| DashboardError::Js("Response is not a string".to_string()))
}

async fn fetch_text(url: &str) -> Result<String> {
    let resp = send(url, "GET", None, false).await?;
    check_status(resp.status())?;
    response_text(&resp).await
}

/// Client for the public network-data sources.
#[wasm_bindgen]
pub struct NetworkDataApi {
    network: Network,
}

impl NetworkDataApi {
    /// Fetch hashrate, difficulty and price. Never fails as a whole.
    pub async fn refresh(&self) -> NetworkRefresh {
        let hashrate_url = format!("{}/v1/mining/hashrate/3d", self.network.mempool_api_url());
        let hashrate = match fetch_text(&hashrate_url).await {
            Ok(text) => parse_hashrate_stats(&text),
            Err(e) => Err(e),
        };
        let price = match fetch_text(COINGECKO_PRICE_URL).await {
            Ok(text) => parse_btc_price(&text),
            Err(e) => Err(e),
        };

        let refresh = NetworkRefresh::merge(hashrate, price);
        for e in &refresh.errors {
            crate::log_warn!("{}", e);
        }
        if let Some(ehs) = refresh.update.hashrate_ehs {
            crate::log_info!("Updated network hashrate: {:.2} EH/s", ehs);
        }
        refresh
    }
}

#[wasm_bindgen]
impl NetworkDataApi {
    #[wasm_bindgen(constructor)]
    pub fn new(network: &str) -> NetworkDataApi {
        NetworkDataApi {
            network: Network::parse(network).unwrap_or_default(),
        }
    }

    /// Fetch the latest network data as `{ update, errors }`.
    #[wasm_bindgen(js_name = fetchNetworkData)]
    pub async fn fetch_network_data(&self) -> core::result::Result<JsValue, JsValue> {
        to_js(&self.refresh().await)
    }

    #[wasm_bindgen(getter)]
    pub fn network(&self) -> String {
        self.network.name().to_string()
    }
}

/// Client for the dashboard REST backend.
///
/// A 401 from any call is reported on the session channel, then returned as
/// an error to the caller.
#[wasm_bindgen]
pub struct DashboardApi {
    base_url: String,
    session: SessionChannel,
}

impl DashboardApi {
    pub fn with_session(base_url: &str, session: SessionChannel) -> Self {
        DashboardApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> Result<JsValue> {
        let resp = send(&self.url(path), method, body, true).await?;
        if let Err(e) = check_status(resp.status()) {
            if matches!(e, DashboardError::Unauthorized) {
                self.session.emit(SessionEvent::Unauthorized);
            }
            return Err(e);
        }
        let json = JsFuture::from(resp.json()?).await?;
        Ok(json)
    }
}

#[wasm_bindgen]
impl DashboardApi {
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: &str, session: &SessionEvents) -> DashboardApi {
        Self::with_session(base_url, session.channel())
    }

    #[wasm_bindgen(js_name = getJson)]
    pub async fn get_json(&self, path: String) -> core::result::Result<JsValue, JsValue> {
        Ok(self.request("GET", &path, None).await?)
    }

    #[wasm_bindgen(js_name = postJson)]
    pub async fn post_json(&self, path: String, body: String) -> core::result::Result<JsValue, JsValue> {
        Ok(self.request("POST", &path, Some(&body)).await?)
    }

    #[wasm_bindgen(getter)]
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
