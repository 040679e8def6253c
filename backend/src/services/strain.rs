//! Strain lookup service
//!
//! Two-stage resolution: the remote strain service is tried first, and any
//! network or non-2xx failure degrades transparently to the built-in strain
//! table. Results are tagged with their provenance so callers can tell
//! remote data from fallback data. Successful remote searches are cached
//! per query string with a fixed time-to-live; staleness is checked lazily
//! on read, and inserts sweep out entries already past their TTL.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;

use crate::config::StrainApiConfig;
use crate::external::StrainApiClient;
use shared::{builtin_strains, Sourced, StrainRecord, FALLBACK_CATEGORIES};

/// Cached result of one remote search
#[derive(Debug, Clone)]
struct CachedSearch {
    fetched_at: DateTime<Utc>,
    records: Vec<StrainRecord>,
}

/// Strain lookup service with remote-first resolution and offline fallback
#[derive(Clone)]
pub struct StrainService {
    client: Option<StrainApiClient>,
    cache: Arc<RwLock<HashMap<String, CachedSearch>>>,
    cache_ttl: Duration,
    local: Arc<Vec<StrainRecord>>,
}

impl StrainService {
    /// Build the service from configuration; an empty base URL disables
    /// remote lookups entirely
    pub fn from_config(config: &StrainApiConfig) -> Self {
        let client = if config.base_url.is_empty() {
            None
        } else {
            Some(StrainApiClient::new(
                config.base_url.clone(),
                StdDuration::from_secs(config.timeout_secs),
            ))
        };

        Self {
            client,
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: Duration::seconds(config.cache_ttl_secs),
            local: Arc::new(builtin_strains()),
        }
    }

    pub fn is_remote_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Search strains by case-insensitive name substring
    ///
    /// An empty query returns the full record set; a query matching nothing
    /// returns an empty list, never an error.
    pub async fn search(&self, query: &str) -> Sourced<Vec<StrainRecord>> {
        let normalized = query.trim().to_lowercase();

        if let Some(records) = self.cached(&normalized) {
            return Sourced::remote(records);
        }

        if let Some(client) = &self.client {
            match client.search_strains(&normalized).await {
                Ok(records) => {
                    self.store_in_cache(&normalized, &records);
                    return Sourced::remote(records);
                }
                Err(e) => {
                    tracing::warn!("Strain search falling back to local table: {}", e);
                }
            }
        }

        let results = self
            .local
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&normalized))
            .cloned()
            .collect();
        Sourced::fallback(results)
    }

    /// List strain categories
    pub async fn categories(&self) -> Sourced<Vec<String>> {
        if let Some(client) = &self.client {
            match client.get_categories().await {
                Ok(categories) => return Sourced::remote(categories),
                Err(e) => {
                    tracing::warn!("Category fetch falling back to local list: {}", e);
                }
            }
        }

        Sourced::fallback(FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }

    /// Pick a random strain from a category
    ///
    /// Offline, the pick comes from the built-in table; a category with no
    /// local records yields None.
    pub async fn random_by_category(&self, category: &str) -> Sourced<Option<StrainRecord>> {
        if let Some(client) = &self.client {
            match client.generate_strain(category).await {
                Ok(strain) => return Sourced::remote(Some(strain)),
                Err(e) => {
                    tracing::warn!("Strain generation falling back to local table: {}", e);
                }
            }
        }

        let candidates: Vec<&StrainRecord> = self
            .local
            .iter()
            .filter(|s| s.category.eq_ignore_ascii_case(category))
            .collect();
        let pick = candidates.choose(&mut rand::thread_rng()).map(|s| (*s).clone());
        Sourced::fallback(pick)
    }

    /// Return a cached search result if it is still fresh
    ///
    /// Stale entries are left in place; they are overwritten by the next
    /// successful fetch for the same query.
    fn cached(&self, query: &str) -> Option<Vec<StrainRecord>> {
        let cache = self.cache.read().ok()?;
        let entry = cache.get(query)?;
        if Utc::now() - entry.fetched_at < self.cache_ttl {
            Some(entry.records.clone())
        } else {
            None
        }
    }

    fn store_in_cache(&self, query: &str, records: &[StrainRecord]) {
        let Ok(mut cache) = self.cache.write() else {
            return;
        };
        // Sweep entries already past their TTL before inserting
        let now = Utc::now();
        let ttl = self.cache_ttl;
        cache.retain(|_, entry| now - entry.fetched_at < ttl);
        cache.insert(
            query.to_string(),
            CachedSearch {
                fetched_at: now,
                records: records.to_vec(),
            },
        );
    }

    #[cfg(test)]
    fn offline_with_ttl(ttl: Duration) -> Self {
        Self {
            client: None,
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: ttl,
            local: Arc::new(builtin_strains()),
        }
    }

    #[cfg(test)]
    fn seed_cache(&self, query: &str, fetched_at: DateTime<Utc>, records: Vec<StrainRecord>) {
        self.cache
            .write()
            .unwrap()
            .insert(query.to_string(), CachedSearch { fetched_at, records });
    }

    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.read().unwrap().len()
    }
}
