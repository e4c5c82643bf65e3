use pendler::{
    routing::{GeocodeResponse, RoutingResponse, TransportMode},
    shared::geo::Coordinate,
};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.geoapify.com";
const AUTOCOMPLETE_LIMIT: u32 = 5;

#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("invalid provider payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Outbound client for the routing and geocoding provider. The API key
/// stays server side, browsers only ever talk to our proxy endpoints.
pub struct Provider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Provider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Requests one route between two points for the given mode.
    pub async fn route(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TransportMode,
    ) -> Result<RoutingResponse, Error> {
        let waypoints = format!(
            "{},{}|{},{}",
            from.latitude, from.longitude, to.latitude, to.longitude
        );
        let url = format!("{}/v1/routing", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("waypoints", waypoints.as_str()),
                ("mode", mode.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Address autocomplete lookup. The first result is the best match.
    pub async fn geocode(&self, text: &str) -> Result<GeocodeResponse, Error> {
        let url = format!("{}/v1/geocode/autocomplete", self.base_url);
        let limit = AUTOCOMPLETE_LIMIT.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("text", text),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
