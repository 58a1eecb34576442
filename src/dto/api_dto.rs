use serde::{Deserialize, Serialize};

use crate::utils::errors::{validation_error, AppError};

/// Envelope for mutation responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Body of a delete submission. Absent or `false` means "not confirmed".
#[derive(Debug, Default, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub confirm: Option<bool>,
}

impl DeleteRequest {
    pub fn ensure_confirmed(&self) -> Result<(), AppError> {
        if self.confirm == Some(true) {
            Ok(())
        } else {
            Err(validation_error(
                "confirm",
                "Deletion must be confirmed with \"confirm\": true.",
            ))
        }
    }
}

/// What a delete would remove, shown before the user confirms.
#[derive(Debug, Serialize)]
pub struct DeletePreview<T, D> {
    pub record: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependents: Option<D>,
}

impl<T, D> DeletePreview<T, D> {
    pub fn new(record: T, dependents: D) -> Self {
        Self {
            record,
            dependents: Some(dependents),
        }
    }
}

impl<T> DeletePreview<T, ()> {
    pub fn record_only(record: T) -> Self {
        Self {
            record,
            dependents: None,
        }
    }
}

/// One selectable option of a form input.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Choice<V = String> {
    pub value: V,
    pub label: String,
}

impl<V> Choice<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

pub fn id_choices(pairs: Vec<(i64, String)>) -> Vec<Choice<i64>> {
    pairs
        .into_iter()
        .map(|(id, label)| Choice::new(id, label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_requires_explicit_confirm() {
        let missing: DeleteRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.ensure_confirmed().is_err());

        let declined: DeleteRequest = serde_json::from_str(r#"{"confirm": false}"#).unwrap();
        assert!(declined.ensure_confirmed().is_err());

        let confirmed: DeleteRequest = serde_json::from_str(r#"{"confirm": true}"#).unwrap();
        assert!(confirmed.ensure_confirmed().is_ok());
    }

    #[test]
    fn test_preview_without_dependents_omits_field() {
        let preview = DeletePreview::record_only("trip");
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json, serde_json::json!({ "record": "trip" }));
    }
}
