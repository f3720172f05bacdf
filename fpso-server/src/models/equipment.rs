//! Equipment column values and the insert request contract

use serde::{Deserialize, Deserializer};

use super::validation::{check_column, ValidationError};
use super::VesselCode;

pub const MAX_EQUIPMENT_NAME_LEN: usize = 12;
pub const MAX_EQUIPMENT_CODE_LEN: usize = 8;
pub const MAX_LOCATION_LEN: usize = 3;
pub const MAX_STATUS_LEN: usize = 12;

/// Status written by the deactivation endpoints
pub const STATUS_INACTIVE: &str = "inactive";

/// Stored in `vessel_code` when the insert body omits `vesselCode`.
///
/// Not a vessel code: existing clients rely on this value, so it is kept
/// as-is rather than mapped to NULL. Send `"vesselCode": null` to store an
/// unassigned row.
pub const DEFAULT_VESSEL_CODE: &str = "active";

/// Presence of `vesselCode` in an insert body.
///
/// `Option<String>` cannot tell a missing key from an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VesselCodeField {
    #[default]
    Omitted,
    Null,
    Value(String),
}

impl<'de> Deserialize<'de> for VesselCodeField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(code) => Self::Value(code),
            None => Self::Null,
        })
    }
}

/// Body of `POST /api/equips/post`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEquipmentRequest {
    pub name: String,
    pub code: String,
    pub location: String,
    pub status: String,
    #[serde(default, rename = "vesselCode")]
    pub vessel_code: VesselCodeField,
}

/// Validated equipment row ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    pub name: String,
    pub code: String,
    pub location: String,
    pub status: String,
    pub vessel_code: Option<String>,
}

impl CreateEquipmentRequest {
    pub fn validate(self) -> Result<NewEquipment, ValidationError> {
        check_column("equipment name", &self.name, MAX_EQUIPMENT_NAME_LEN)?;
        check_column("equipment code", &self.code, MAX_EQUIPMENT_CODE_LEN)?;
        check_column("location", &self.location, MAX_LOCATION_LEN)?;
        check_column("status", &self.status, MAX_STATUS_LEN)?;

        let vessel_code = match self.vessel_code {
            VesselCodeField::Omitted => Some(DEFAULT_VESSEL_CODE.to_owned()),
            VesselCodeField::Null => None,
            VesselCodeField::Value(code) => Some(VesselCode::new(&code)?.into_string()),
        };

        Ok(NewEquipment {
            name: self.name,
            code: self.code,
            location: self.location,
            status: self.status,
            vessel_code,
        })
    }
}
