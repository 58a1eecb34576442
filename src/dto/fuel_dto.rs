use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::api_dto::Choice;
use crate::models::fuel_log::{FuelLogFields, FuelLogRow};
use crate::utils::errors::AppError;
use crate::utils::money::Amount;
use crate::utils::validation::{required, to_amount};

#[derive(Debug, Deserialize, Validate)]
pub struct FuelLogForm {
    #[validate(required(message = "This field is required."))]
    pub vehicle: Option<i64>,
    #[validate(required(message = "This field is required."))]
    pub date: Option<NaiveDate>,
    #[validate(
        required(message = "This field is required."),
        custom = "crate::utils::validation::validate_amount"
    )]
    pub fuel_quantity: Option<Decimal>,
    #[validate(
        required(message = "This field is required."),
        custom = "crate::utils::validation::validate_amount"
    )]
    pub cost: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "crate::utils::validation::validate_amount")]
    pub odometer_reading: Option<Decimal>,
}

impl FuelLogForm {
    pub fn into_fields(self) -> Result<FuelLogFields, AppError> {
        Ok(FuelLogFields {
            vehicle_id: required(self.vehicle, "vehicle")?,
            date: required(self.date, "date")?,
            fuel_quantity: to_amount(
                required(self.fuel_quantity, "fuel_quantity")?,
                "fuel_quantity",
            )?,
            cost: to_amount(required(self.cost, "cost")?, "cost")?,
            odometer_reading: self
                .odometer_reading
                .map(|r| to_amount(r, "odometer_reading"))
                .transpose()?,
        })
    }
}

/// Fuel list with running totals over every log.
#[derive(Debug, Serialize)]
pub struct FuelLogList {
    pub fuel_logs: Vec<FuelLogRow>,
    pub total_cost: Amount,
    pub total_quantity: Amount,
}

#[derive(Debug, Serialize)]
pub struct FuelFormOptions {
    pub vehicles: Vec<Choice<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_odometer() {
        let form: FuelLogForm = serde_json::from_value(json!({
            "vehicle": 3,
            "date": "2024-01-05",
            "fuel_quantity": "40.1",
            "cost": "50.00"
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let fields = form.into_fields().unwrap();
        assert_eq!(fields.odometer_reading, None);
        assert_eq!(fields.cost, Amount::from_cents(5_000));
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let form: FuelLogForm = serde_json::from_value(json!({
            "vehicle": 3,
            "date": "2024-01-05",
            "fuel_quantity": "40",
            "cost": "-5",
            "odometer_reading": "1.234"
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("cost"));
        assert!(fields.contains_key("odometer_reading"));
    }
}
