use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::api_dto::Choice;
use crate::models::trip::{TripFields, TripStatus};
use crate::utils::errors::AppError;
use crate::utils::validation::{required, to_amount};

#[derive(Debug, Deserialize, Validate)]
pub struct TripForm {
    #[validate(required(message = "This field is required."))]
    pub vehicle: Option<i64>,
    #[validate(required(message = "This field is required."))]
    pub driver: Option<i64>,
    #[validate(
        required(message = "This field is required."),
        length(max = 200, message = "Ensure this value has at most 200 characters."),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub start_location: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 200, message = "Ensure this value has at most 200 characters."),
        custom = "crate::utils::validation::validate_not_blank"
    )]
    pub end_location: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom = "crate::utils::validation::validate_amount"
    )]
    pub distance: Option<Decimal>,
    #[serde(default)]
    pub status: Option<TripStatus>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TripForm {
    pub fn into_fields(self) -> Result<TripFields, AppError> {
        Ok(TripFields {
            vehicle_id: required(self.vehicle, "vehicle")?,
            driver_id: required(self.driver, "driver")?,
            start_location: required(self.start_location, "start_location")?
                .trim()
                .to_string(),
            end_location: required(self.end_location, "end_location")?
                .trim()
                .to_string(),
            distance: to_amount(required(self.distance, "distance")?, "distance")?,
            status: self.status.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TripFormOptions {
    pub vehicles: Vec<Choice<i64>>,
    pub drivers: Vec<Choice<i64>>,
    pub statuses: Vec<Choice>,
}

impl TripFormOptions {
    pub fn new(vehicles: Vec<Choice<i64>>, drivers: Vec<Choice<i64>>) -> Self {
        Self {
            vehicles,
            drivers,
            statuses: TripStatus::ALL
                .iter()
                .map(|s| Choice::new(s.as_str().to_string(), s.label()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_notes_dropped() {
        let form: TripForm = serde_json::from_value(json!({
            "vehicle": 1,
            "driver": 2,
            "start_location": "Depot",
            "end_location": "Harbor",
            "distance": "42.50",
            "status": "in_progress",
            "notes": "   "
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let fields = form.into_fields().unwrap();
        assert_eq!(fields.status, TripStatus::InProgress);
        assert_eq!(fields.notes, None);
        assert_eq!(fields.distance.to_string(), "42.50");
    }

    #[test]
    fn test_missing_references_reported() {
        let form: TripForm = serde_json::from_value(json!({
            "start_location": "Depot",
            "end_location": "Harbor",
            "distance": 10
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("vehicle"));
        assert!(fields.contains_key("driver"));
    }
}
