//! Trip destination and current position holders. Positions come from a
//! [`PositionProvider`]; the store only records what the provider reports and
//! keeps the last known geometry when a read fails.

use serde::{Deserialize, Serialize};
use std::{fmt, future::Future};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    pub address: String,
    pub geometry: Coordinates,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub geometry: Coordinates,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    Unavailable(String),
    Timeout,
}

impl fmt::Display for LocationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(formatter, "Location permission denied"),
            LocationError::Unavailable(message) => {
                write!(formatter, "Location unavailable: {message}")
            }
            LocationError::Timeout => write!(formatter, "Location request timed out"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Source of the device's current position.
pub trait PositionProvider {
    fn current_position(&self) -> impl Future<Output = Result<Position, LocationError>> + Send;
}

/// Provider that always reports the same coordinates.
#[derive(Clone, Copy, Debug)]
pub struct FixedPosition(pub Coordinates);

impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Position, LocationError> {
        Ok(Position { geometry: self.0 })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationStore {
    pub destination: Destination,
    pub current_position: Position,
}

impl LocationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_destination(&mut self, destination: Destination) {
        debug!(name = %destination.name, "destination updated");
        self.destination = destination;
    }

    /// Reads the provider and records the reported geometry.
    ///
    /// # Errors
    /// Propagates the provider's error; the previous position is kept.
    pub async fn update_current_position<P: PositionProvider>(
        &mut self,
        provider: &P,
    ) -> Result<Position, LocationError> {
        match provider.current_position().await {
            Ok(position) => {
                self.current_position.geometry = position.geometry;
                Ok(position)
            }
            Err(err) => {
                warn!("Failed to read current position: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Denied;

    impl PositionProvider for Denied {
        async fn current_position(&self) -> Result<Position, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    #[test]
    fn new_store_has_unknown_geometry() {
        let store = LocationStore::new();
        assert_eq!(store.destination.name, "");
        assert_eq!(store.destination.address, "");
        assert!(!store.destination.geometry.is_known());
        assert!(!store.current_position.geometry.is_known());
    }

    #[tokio::test]
    async fn update_current_position_records_provider_geometry() {
        let mut store = LocationStore::new();
        let provider = FixedPosition(Coordinates::new(19.43, -99.13));

        let position = store.update_current_position(&provider).await.unwrap();

        assert_eq!(position.geometry, Coordinates::new(19.43, -99.13));
        assert_eq!(store.current_position.geometry.lat, Some(19.43));
        assert_eq!(store.current_position.geometry.lng, Some(-99.13));
    }

    #[tokio::test]
    async fn failed_read_keeps_last_position() {
        let mut store = LocationStore::new();
        store
            .update_current_position(&FixedPosition(Coordinates::new(1.0, 2.0)))
            .await
            .unwrap();

        let err = store.update_current_position(&Denied).await.unwrap_err();

        assert_eq!(err, LocationError::PermissionDenied);
        assert_eq!(store.current_position.geometry, Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn set_destination_replaces_destination() {
        let mut store = LocationStore::new();
        store.set_destination(Destination {
            name: "Office".to_string(),
            address: "1 Main St".to_string(),
            geometry: Coordinates::new(40.7, -74.0),
        });

        assert_eq!(store.destination.name, "Office");
        assert!(store.destination.geometry.is_known());
    }

    #[test]
    fn destination_serializes_with_null_coordinates() {
        let value = serde_json::to_value(Destination::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "",
                "address": "",
                "geometry": { "lat": null, "lng": null }
            })
        );
    }
}
