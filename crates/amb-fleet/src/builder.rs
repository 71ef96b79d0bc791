//! Validated construction of the initial [`Registry`].
//!
//! # Usage
//!
//! ```rust
//! use amb_core::GeoPoint;
//! use amb_fleet::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new()
//!     .ambulance(GeoPoint::new(52.52, 13.40))
//!     .hospital(GeoPoint::new(52.53, 13.38), 4)
//!     .station(GeoPoint::new(52.50, 13.42))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.ambulances.len(), 1);
//! assert_eq!(registry.hospitals[0].free_beds(), 4);
//! ```

use amb_core::{AmbulanceId, GeoPoint, HospitalId};
use serde::{Deserialize, Serialize};

use crate::{Ambulance, FleetError, FleetResult, Hospital, Registry};

// ── Input records ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbulanceSpec {
    pub location: GeoPoint,
    #[serde(default)]
    pub broken:   bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HospitalSpec {
    pub location: GeoPoint,
    pub capacity: u32,
    /// Beds already taken at minute 0.
    #[serde(default)]
    pub occupied: u32,
}

/// Static map of a scenario: the fleet, the hospitals, the rescue stations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapInput {
    pub ambulances: Vec<AmbulanceSpec>,
    pub hospitals:  Vec<HospitalSpec>,
    #[serde(default)]
    pub stations:   Vec<GeoPoint>,
}

// ── RegistryBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for a [`Registry`].
///
/// Nothing is checked until [`build`](Self::build); the first invalid record
/// aborts with a [`FleetError`].
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    map: MapInput,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: MapInput) -> Self {
        Self { map }
    }

    pub fn ambulance(mut self, location: GeoPoint) -> Self {
        self.map.ambulances.push(AmbulanceSpec { location, broken: false });
        self
    }

    pub fn broken_ambulance(mut self, location: GeoPoint) -> Self {
        self.map.ambulances.push(AmbulanceSpec { location, broken: true });
        self
    }

    pub fn hospital(self, location: GeoPoint, capacity: u32) -> Self {
        self.hospital_with_occupancy(location, capacity, 0)
    }

    pub fn hospital_with_occupancy(mut self, location: GeoPoint, capacity: u32, occupied: u32) -> Self {
        self.map.hospitals.push(HospitalSpec { location, capacity, occupied });
        self
    }

    pub fn station(mut self, location: GeoPoint) -> Self {
        self.map.stations.push(location);
        self
    }

    /// Validate every record and assign ids in input order.
    pub fn build(self) -> FleetResult<Registry> {
        let MapInput { ambulances, hospitals, stations } = self.map;

        let ambulances = ambulances
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = AmbulanceId::try_from(i).map_err(|_| FleetError::TooMany("ambulances"))?;
                check_point(spec.location, || id.to_string())?;
                Ok(Ambulance::new(id, spec.location, spec.broken))
            })
            .collect::<FleetResult<Vec<_>>>()?;

        let hospitals = hospitals
            .into_iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = HospitalId::try_from(i).map_err(|_| FleetError::TooMany("hospitals"))?;
                check_point(spec.location, || id.to_string())?;
                if spec.capacity == 0 {
                    return Err(FleetError::ZeroCapacity(id));
                }
                if spec.occupied > spec.capacity {
                    return Err(FleetError::OverOccupied {
                        hospital: id,
                        occupied: spec.occupied,
                        capacity: spec.capacity,
                    });
                }
                Ok(Hospital::new(id, spec.location, spec.capacity, spec.occupied))
            })
            .collect::<FleetResult<Vec<_>>>()?;

        for (i, &p) in stations.iter().enumerate() {
            check_point(p, || format!("station #{i}"))?;
        }

        Ok(Registry { ambulances, emergencies: Vec::new(), hospitals, stations })
    }
}

pub(crate) fn check_point(p: GeoPoint, what: impl FnOnce() -> String) -> FleetResult<()> {
    if p.is_valid() {
        Ok(())
    } else {
        Err(FleetError::InvalidCoordinates { what: what(), lat: p.lat, lng: p.lng })
    }
}
