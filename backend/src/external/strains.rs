//! Strain information service client
//!
//! Thin REST client over the strain database: substring search, category
//! listing, and random strain generation. Every call is a single attempt
//! bounded by a client-side timeout; callers are expected to fall back to
//! the built-in strain table on any error.

use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use shared::{DecimalRange, FeedingType, StrainRecord};

/// Strain API client
#[derive(Clone)]
pub struct StrainApiClient {
    client: Client,
    base_url: String,
}

/// Strain record as the remote service serializes it
#[derive(Debug, Deserialize)]
struct RemoteStrain {
    name: String,
    category: String,
    thc_min: Option<f64>,
    thc_max: Option<f64>,
    cbd_min: Option<f64>,
    cbd_max: Option<f64>,
    flowering_weeks: Option<u8>,
    feeding: Option<String>,
    ec_veg_min: Option<f64>,
    ec_veg_max: Option<f64>,
    ec_flower_min: Option<f64>,
    ec_flower_max: Option<f64>,
    ph_min: Option<f64>,
    ph_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RemoteSearchResponse {
    results: Vec<RemoteStrain>,
}

#[derive(Debug, Deserialize)]
struct RemoteCategoriesResponse {
    categories: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    category: &'a str,
}

impl StrainApiClient {
    /// Create a new StrainApiClient with the given request timeout
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    /// Search strains by name substring
    pub async fn search_strains(&self, query: &str) -> AppResult<Vec<StrainRecord>> {
        let url = format!("{}/api/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Strain search failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Strain search returned {}",
                response.status()
            )));
        }

        let data: RemoteSearchResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse strain search response: {}", e))
        })?;

        Ok(data.results.into_iter().map(convert_remote_strain).collect())
    }

    /// Fetch the list of strain categories
    pub async fn get_categories(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/api/categories", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Category fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Category fetch returned {}",
                response.status()
            )));
        }

        let data: RemoteCategoriesResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse categories response: {}", e))
        })?;

        Ok(data.categories)
    }

    /// Ask the service for a random strain in a category
    pub async fn generate_strain(&self, category: &str) -> AppResult<StrainRecord> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { category })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Strain generation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Strain generation returned {}",
                response.status()
            )));
        }

        let data: RemoteStrain = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse generated strain: {}", e))
        })?;

        Ok(convert_remote_strain(data))
    }
}

fn dec_or_zero(value: Option<f64>) -> Decimal {
    value
        .and_then(Decimal::from_f64_retain)
        .unwrap_or_default()
}

fn band(min: Option<f64>, max: Option<f64>) -> DecimalRange {
    DecimalRange::new(dec_or_zero(min), dec_or_zero(max))
}

/// Convert the remote wire format to our record type
fn convert_remote_strain(remote: RemoteStrain) -> StrainRecord {
    let feeding_type = match remote.feeding.as_deref() {
        Some("light") | Some("Light") => FeedingType::Light,
        Some("heavy") | Some("Heavy") => FeedingType::Heavy,
        _ => FeedingType::Medium,
    };

    // Unspecified pH bands default to the standard hydroponic window
    let optimal_ph = match (remote.ph_min, remote.ph_max) {
        (None, None) => DecimalRange::new(Decimal::new(58, 1), Decimal::new(62, 1)),
        (min, max) => band(min, max),
    };

    StrainRecord {
        name: remote.name,
        category: remote.category,
        thc_range: band(remote.thc_min, remote.thc_max),
        cbd_range: band(remote.cbd_min, remote.cbd_max),
        flowering_time_weeks: remote.flowering_weeks.unwrap_or(8),
        feeding_type,
        optimal_ec_veg: band(remote.ec_veg_min, remote.ec_veg_max),
        optimal_ec_flower: band(remote.ec_flower_min, remote.ec_flower_max),
        optimal_ph,
    }
}
