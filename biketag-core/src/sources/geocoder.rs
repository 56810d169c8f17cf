//! Google Places geocoder
//!
//! # API Reference
//! - Endpoint: `GET https://maps.googleapis.com/maps/api/place/findplacefromtext/json`
//! - Parameters: `input`, `inputtype=textquery`,
//!   `fields=formatted_address,name,geometry`, `locationbias`, `key`
//! - Only the first candidate is used.

use super::{request_error, Geocoder, SourceError};
use async_trait::async_trait;
use biketag_common::config::GeocoderConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Find Place endpoint
const FIND_PLACE_URL: &str =
    "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";

const FIELDS: &str = "formatted_address,name,geometry";

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Google Places "Find Place from Text" client
pub struct GooglePlacesGeocoder {
    http_client: Client,
    api_key: String,
    location_bias: String,
}

impl GooglePlacesGeocoder {
    pub fn new(api_key: impl Into<String>, config: &GeocoderConfig) -> Result<Self, SourceError> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            location_bias: config.location_bias.clone(),
        })
    }
}

/// First candidate's coordinates
fn parse_find_place(body: &str) -> Result<Option<(f64, f64)>, SourceError> {
    let response: FindPlaceResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("Failed to parse Places response: {}", e)))?;

    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" | "" => {}
        status => {
            return Err(SourceError::Api(
                200,
                response
                    .error_message
                    .unwrap_or_else(|| format!("Places status {}", status)),
            ))
        }
    }

    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.geometry)
        .map(|geometry| (geometry.location.lat, geometry.location.lng)))
}

#[async_trait]
impl Geocoder for GooglePlacesGeocoder {
    async fn find_place(&self, text: &str) -> Result<Option<(f64, f64)>, SourceError> {
        debug!(input = %text, "Geocoding found-at text");

        let params = [
            ("input", text),
            ("inputtype", "textquery"),
            ("fields", FIELDS),
            ("locationbias", self.location_bias.as_str()),
            ("key", self.api_key.as_str()),
        ];

        let response = self
            .http_client
            .get(FIND_PLACE_URL)
            .query(&params)
            .send()
            .await
            .map_err(|e| request_error("Places", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| request_error("Places", e))?;
        let location = parse_find_place(&body)?;
        debug!(input = %text, location = ?location, "Geocoding complete");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate() {
        let body = r#"{
            "candidates": [
                {"name": "Stone Arch Bridge", "geometry": {"location": {"lat": 44.9807, "lng": -93.2536}}},
                {"name": "Other", "geometry": {"location": {"lat": 1.0, "lng": 2.0}}}
            ],
            "status": "OK"
        }"#;
        assert_eq!(parse_find_place(body).unwrap(), Some((44.9807, -93.2536)));
    }

    #[test]
    fn test_zero_results() {
        let body = r#"{"candidates": [], "status": "ZERO_RESULTS"}"#;
        assert_eq!(parse_find_place(body).unwrap(), None);
    }

    #[test]
    fn test_denied_request() {
        let body = r#"{"candidates": [], "status": "REQUEST_DENIED", "error_message": "bad key"}"#;
        assert!(matches!(parse_find_place(body), Err(SourceError::Api(_, ref m)) if m == "bad key"));
    }
}
