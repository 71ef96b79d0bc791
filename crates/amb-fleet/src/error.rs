use amb_core::HospitalId;
use thiserror::Error;

/// Input-data failures.  All of them are fatal at initialization.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("{what} has coordinates ({lat}, {lng}) outside the WGS-84 range")]
    InvalidCoordinates {
        what: String,
        lat:  f64,
        lng:  f64,
    },

    #[error("hospital {0} has zero bed capacity")]
    ZeroCapacity(HospitalId),

    #[error("hospital {hospital} starts with {occupied} occupied beds but only has {capacity}")]
    OverOccupied {
        hospital: HospitalId,
        occupied: u32,
        capacity: u32,
    },

    #[error("call #{call} lists unknown hospital {hospital}")]
    UnknownHospital {
        call:     usize,
        hospital: HospitalId,
    },

    #[error("too many {0} for 32-bit ids")]
    TooMany(&'static str),
}

pub type FleetResult<T> = Result<T, FleetError>;
