use serde::Serialize;
use serde_json::{Map, Value};

use super::values;
use crate::pii::Masked;

/// A customer partition root
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Masked<String>>,
}

impl Customer {
    pub fn from_fields(id: impl Into<String>, fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            id: id.into(),
            is_active: values::is_truthy(fields.get("isActive")),
            display_name: text("displayName"),
            email: text("email").map(Masked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_flag_means_inactive() {
        let customer = Customer::from_fields("u2", &Map::new());
        assert_eq!(customer.id, "u2");
        assert!(!customer.is_active);
        assert_eq!(customer.display_name, None);
    }

    #[test]
    fn test_from_fields() {
        let Value::Object(fields) = json!({
            "isActive": true,
            "displayName": "Ada",
            "email": "ada@example.com"
        }) else {
            unreachable!()
        };

        let customer = Customer::from_fields("u1", &fields);
        assert!(customer.is_active);
        assert_eq!(customer.display_name.as_deref(), Some("Ada"));

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["email"], "ada@example.com");
    }
}
