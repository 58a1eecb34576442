use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::api_dto::Choice;
use crate::models::driver::DriverFields;
use crate::utils::errors::AppError;
use crate::utils::validation::required;

#[derive(Debug, Deserialize, Validate)]
pub struct DriverForm {
    #[validate(
        required(message = "This field is required."),
        length(max = 200, message = "Ensure this value has at most 200 characters."),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub driver_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 20, message = "Ensure this value has at most 20 characters."),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub phone: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 50, message = "Ensure this value has at most 50 characters."),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub license_number: Option<String>,
    #[validate(
        required(message = "This field is required."),
        range(min = 0, message = "Ensure this value is greater than or equal to 0.")
    )]
    pub experience: Option<i32>,
    /// Vehicle id, or absent for an unassigned driver.
    #[serde(default)]
    pub assigned_vehicle: Option<i64>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl DriverForm {
    pub fn into_fields(self) -> Result<DriverFields, AppError> {
        Ok(DriverFields {
            driver_name: required(self.driver_name, "driver_name")?.trim().to_string(),
            phone: required(self.phone, "phone")?.trim().to_string(),
            license_number: required(self.license_number, "license_number")?
                .trim()
                .to_string(),
            experience: required(self.experience, "experience")?,
            assigned_vehicle_id: self.assigned_vehicle,
            is_available: self.is_available.unwrap_or(true),
        })
    }
}

/// Trips that deleting a driver would remove.
#[derive(Debug, Serialize)]
pub struct DriverDependents {
    pub trips: i64,
}

#[derive(Debug, Serialize)]
pub struct DriverFormOptions {
    pub vehicles: Vec<Choice<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_available_by_default() {
        let form: DriverForm = serde_json::from_value(json!({
            "driver_name": "Dana Reyes",
            "phone": "555-0100",
            "license_number": "DL-1",
            "experience": 4
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let fields = form.into_fields().unwrap();
        assert!(fields.is_available);
        assert_eq!(fields.assigned_vehicle_id, None);
    }

    #[test]
    fn test_negative_experience_rejected() {
        let form: DriverForm = serde_json::from_value(json!({
            "driver_name": "Dana Reyes",
            "phone": "555-0100",
            "license_number": "DL-1",
            "experience": -1
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("experience"));
    }

    #[test]
    fn test_long_phone_rejected() {
        let form: DriverForm = serde_json::from_value(json!({
            "driver_name": "Dana Reyes",
            "phone": "5".repeat(21),
            "license_number": "DL-1",
            "experience": 1
        }))
        .unwrap();
        assert!(form.validate().unwrap_err().field_errors().contains_key("phone"));
    }
}
