//! Request values with validation at construction
//!
//! Everything a client sends is checked against the declared column
//! widths here. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod vessel;
pub mod equipment;

pub use validation::ValidationError;
pub use vessel::{VesselCode, VesselCodeRequest};
pub use equipment::{
    CreateEquipmentRequest, NewEquipment, VesselCodeField, DEFAULT_VESSEL_CODE,
    STATUS_INACTIVE,
};
