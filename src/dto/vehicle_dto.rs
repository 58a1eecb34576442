use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::api_dto::Choice;
use crate::models::vehicle::{VehicleFields, VehicleStatus, VehicleType};
use crate::utils::errors::AppError;
use crate::utils::validation::{required, to_amount};

/// Submitted vehicle record, used for both add and edit.
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleForm {
    #[validate(
        required(message = "This field is required."),
        length(max = 50, message = "Ensure this value has at most 50 characters."),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
    #[validate(
        required(message = "This field is required."),
        custom = "crate::utils::validation::validate_amount"
    )]
    pub capacity: Option<Decimal>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
}

impl VehicleForm {
    pub fn into_fields(self) -> Result<VehicleFields, AppError> {
        Ok(VehicleFields {
            vehicle_number: required(self.vehicle_number, "vehicle_number")?
                .trim()
                .to_string(),
            vehicle_type: self.vehicle_type.unwrap_or_default(),
            capacity: to_amount(required(self.capacity, "capacity")?, "capacity")?,
            purchase_date: self.purchase_date,
            status: self.status.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleFormOptions {
    pub vehicle_types: Vec<Choice>,
    pub statuses: Vec<Choice>,
}

impl VehicleFormOptions {
    pub fn new() -> Self {
        Self {
            vehicle_types: VehicleType::ALL
                .iter()
                .map(|t| Choice::new(t.as_str().to_string(), t.label()))
                .collect(),
            statuses: VehicleStatus::ALL
                .iter()
                .map(|s| Choice::new(s.as_str().to_string(), s.label()))
                .collect(),
        }
    }
}

impl Default for VehicleFormOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::money::Amount;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let form: VehicleForm =
            serde_json::from_value(json!({ "vehicle_number": " V-100 ", "capacity": "12.5" }))
                .unwrap();
        assert!(form.validate().is_ok());

        let fields = form.into_fields().unwrap();
        assert_eq!(fields.vehicle_number, "V-100");
        assert_eq!(fields.vehicle_type, VehicleType::Truck);
        assert_eq!(fields.status, VehicleStatus::Active);
        assert_eq!(fields.capacity, Amount::from_cents(1_250));
    }

    #[test]
    fn test_missing_and_invalid_fields_reported() {
        let form: VehicleForm =
            serde_json::from_value(json!({ "vehicle_number": "", "capacity": "-1" })).unwrap();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("vehicle_number"));
        assert!(fields.contains_key("capacity"));
    }

    #[test]
    fn test_options_list_every_status() {
        let options = VehicleFormOptions::new();
        assert_eq!(options.vehicle_types.len(), 5);
        assert!(options
            .statuses
            .iter()
            .any(|c| c.value == "maintenance" && c.label == "Under Maintenance"));
    }
}
