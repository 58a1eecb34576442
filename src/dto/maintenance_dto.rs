use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::api_dto::Choice;
use crate::models::maintenance_log::{MaintenanceLogFields, MaintenanceLogRow, MaintenanceType};
use crate::utils::errors::AppError;
use crate::utils::money::Amount;
use crate::utils::validation::{required, to_amount};

#[derive(Debug, Deserialize, Validate)]
pub struct MaintenanceLogForm {
    #[validate(required(message = "This field is required."))]
    pub vehicle: Option<i64>,
    #[validate(required(message = "This field is required."))]
    pub maintenance_type: Option<MaintenanceType>,
    #[validate(required(message = "This field is required."))]
    pub date: Option<NaiveDate>,
    #[validate(
        required(message = "This field is required."),
        custom = "crate::utils::validation::validate_amount"
    )]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub next_due_date: Option<NaiveDate>,
}

impl MaintenanceLogForm {
    pub fn into_fields(self) -> Result<MaintenanceLogFields, AppError> {
        Ok(MaintenanceLogFields {
            vehicle_id: required(self.vehicle, "vehicle")?,
            maintenance_type: required(self.maintenance_type, "maintenance_type")?,
            date: required(self.date, "date")?,
            cost: to_amount(required(self.cost, "cost")?, "cost")?,
            description: self.description.filter(|d| !d.trim().is_empty()),
            next_due_date: self.next_due_date,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MaintenanceLogList {
    pub maintenance_logs: Vec<MaintenanceLogRow>,
    pub total_cost: Amount,
    /// Soonest-due logs from today on.
    pub upcoming: Vec<MaintenanceLogRow>,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceFormOptions {
    pub vehicles: Vec<Choice<i64>>,
    pub maintenance_types: Vec<Choice>,
}

impl MaintenanceFormOptions {
    pub fn new(vehicles: Vec<Choice<i64>>) -> Self {
        Self {
            vehicles,
            maintenance_types: MaintenanceType::ALL
                .iter()
                .map(|t| Choice::new(t.as_str().to_string(), t.label()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_parses_type() {
        let form: MaintenanceLogForm = serde_json::from_value(json!({
            "vehicle": 1,
            "maintenance_type": "oil_change",
            "date": "2024-06-01",
            "cost": 120,
            "next_due_date": "2024-09-01"
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let fields = form.into_fields().unwrap();
        assert_eq!(fields.maintenance_type, MaintenanceType::OilChange);
        assert_eq!(fields.cost, Amount::from_cents(12_000));
        assert_eq!(fields.description, None);
    }

    #[test]
    fn test_options_carry_labels() {
        let options = MaintenanceFormOptions::new(Vec::new());
        assert_eq!(options.maintenance_types.len(), 6);
        assert_eq!(options.maintenance_types[0].label, "Oil Change");
    }
}
