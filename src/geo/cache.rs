use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::geo::client::GeocoderClient;
use crate::geo::models::GeoPoint;
use crate::geo::repository::CoordinateRepository;

/// Address → coordinate cache backed by the `coordinates` table.
///
/// Lookups go to the database first; only previously unseen addresses reach
/// the external geocoder, and every attempt — successful or not — is
/// persisted, so each distinct address is geocoded at most once.
#[derive(Clone)]
pub struct CoordinateCache {
    repository: CoordinateRepository,
    client: Arc<GeocoderClient>,
}

impl CoordinateCache {
    /// Create a new CoordinateCache
    pub fn new(repository: CoordinateRepository, client: Arc<GeocoderClient>) -> Self {
        Self { repository, client }
    }

    /// Resolve one address, geocoding it on first use.
    ///
    /// Returns `Ok(None)` when the address is cached as unresolvable or the
    /// provider cannot find it. Geocoder failures are logged and degrade to
    /// `None`; only database errors propagate.
    pub async fn resolve(&self, address: &str) -> Result<Option<GeoPoint>, sqlx::Error> {
        if let Some(cached) = self.repository.find_by_address(address).await? {
            return Ok(cached.point());
        }

        self.fetch_and_store(address).await
    }

    /// Resolve a batch of addresses, geocoding only the cache misses.
    ///
    /// Addresses that cannot be resolved are simply absent from the returned
    /// map. This is the access pattern of the manager order view, which needs
    /// coordinates for every order and restaurant address at once.
    pub async fn resolve_many(
        &self,
        addresses: &[String],
    ) -> Result<HashMap<String, GeoPoint>, sqlx::Error> {
        let unique: Vec<String> = addresses
            .iter()
            .filter(|address| !address.is_empty())
            .cloned()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut resolved = HashMap::new();
        let mut cached_addresses = HashSet::new();

        for row in self.repository.find_by_addresses(&unique).await? {
            if let Some(point) = row.point() {
                resolved.insert(row.address.clone(), point);
            }
            cached_addresses.insert(row.address);
        }

        for address in &unique {
            if cached_addresses.contains(address) {
                continue;
            }
            if let Some(point) = self.fetch_and_store(address).await? {
                resolved.insert(address.clone(), point);
            }
        }

        Ok(resolved)
    }

    /// Geocode a previously unseen address and persist the outcome.
    ///
    /// Provider and transport failures are recorded the same way as "address
    /// not found": a NULL-coordinate row, so a permanently bad address is
    /// attempted only once.
    async fn fetch_and_store(&self, address: &str) -> Result<Option<GeoPoint>, sqlx::Error> {
        let fetched = match self.client.geocode(address).await {
            Ok(point) => point,
            Err(err) => {
                tracing::warn!("Geocoding failed for address {:?}: {}", address, err);
                None
            }
        };

        self.repository.insert(address, fetched).await?;

        Ok(fetched)
    }
}
