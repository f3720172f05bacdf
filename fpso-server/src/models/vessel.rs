//! Vessel column values

use serde::Deserialize;

use super::validation::{check_column, ValidationError};

/// Declared width of `vessel.code`
pub const MAX_VESSEL_CODE_LEN: usize = 5;

/// Validated vessel business code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselCode(String);

impl VesselCode {
    /// Create a vessel code.
    ///
    /// # Rules
    /// - Not empty
    /// - Max 5 characters
    ///
    /// # Example
    /// ```
    /// use fpso_server::models::VesselCode;
    ///
    /// assert!(VesselCode::new("V001").is_ok());
    /// assert!(VesselCode::new("V00001").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_column("vessel code", s, MAX_VESSEL_CODE_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Body of `POST /api/vessels/post` and `PUT /api/vessels/update/code/{id}`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VesselCodeRequest {
    pub code: String,
}

impl VesselCodeRequest {
    pub fn validate(self) -> Result<VesselCode, ValidationError> {
        VesselCode::new(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(VesselCode::new("V001").is_ok());
        assert!(VesselCode::new("ABCDE").is_ok());
        assert!(VesselCode::new("x").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = VesselCode::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let err = VesselCode::new("ABCDEF").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 5, .. }));
    }

    #[test]
    fn request_requires_code() {
        let err = serde_json::from_str::<VesselCodeRequest>("{}").unwrap_err();
        assert!(err.to_string().contains("missing field `code`"));
    }

    #[test]
    fn request_rejects_unknown_fields() {
        let res = serde_json::from_str::<VesselCodeRequest>(r#"{"code":"V1","id":3}"#);
        assert!(res.is_err());
    }
}
