use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::common::transport::string_or_number;

#[derive(Serialize, Clone, Debug)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct SessionForm<'a> {
    pub username: &'a str,
    #[serde(rename = "sessionId")]
    pub session_id: &'a str,
}

#[derive(Serialize, Debug)]
pub struct UserQuery<'a> {
    pub username: &'a str,
}

/// Form body of `POST /spending`, amount is forwarded as typed, the server parses it.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewSpend {
    pub username: String,
    pub currency: String,
    pub amount: String,
    pub kind_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpendKind {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Spend {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub kind: Option<SpendKind>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Spend {
    pub fn kind_name(&self) -> &str {
        self.kind.as_ref().map(|k| k.name.as_str()).unwrap_or("-")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub spends: Option<Vec<Spend>>,
    #[serde(rename = "spending_kinds", default)]
    pub spend_kinds: Option<Vec<SpendKind>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{NewSpend, Spend, SpendKind};

    #[test]
    fn spend_accepts_numeric_ids() {
        let spend: Spend = serde_json::from_value(json!({
            "id": 77,
            "amount": 12.5,
            "currency": "USD",
            "kind": {"id": 3, "name": "Food"},
            "timestamp": "2020-01-19T10:14:02Z"
        }))
        .unwrap();

        assert_eq!("77", spend.id);
        assert_eq!(
            Some(SpendKind {
                id: "3".to_string(),
                name: "Food".to_string()
            }),
            spend.kind
        );
        assert_eq!("Food", spend.kind_name());
    }

    #[test]
    fn spend_without_kind_has_placeholder_name() {
        let spend: Spend = serde_json::from_value(json!({
            "id": "a1", "amount": 3, "currency": "EUR", "kind": null
        }))
        .unwrap();

        assert_eq!("-", spend.kind_name());
        assert_eq!(None, spend.timestamp);
    }

    #[test]
    fn new_spend_is_form_encoded_with_server_field_names() {
        let body = serde_json::to_value(NewSpend {
            username: "alice".to_string(),
            currency: "USD".to_string(),
            amount: "12.5".to_string(),
            kind_id: "3".to_string(),
        })
        .unwrap();

        assert_eq!(
            json!({"username": "alice", "currency": "USD", "amount": "12.5", "kind_id": "3"}),
            body
        );
    }
}
