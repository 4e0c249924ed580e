//! Expense record and request payload

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Expense as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i32,
    pub title: String,
    pub amount: i32,
    pub note: String,
    pub tags: Vec<String>,
}

/// Create/update payload.
///
/// Binding is loose: missing or `null` fields fall back to their zero
/// value and unknown fields (including any `id`) are ignored. Values of
/// the wrong type still fail deserialization. Capitalized and upper-case
/// keys (`"Title"`, `"AMOUNT"`) bind like their lower-case form; sending
/// two spellings of the same key is a duplicate-field error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    #[serde(
        default,
        alias = "Title",
        alias = "TITLE",
        deserialize_with = "null_as_default"
    )]
    pub title: String,
    #[serde(
        default,
        alias = "Amount",
        alias = "AMOUNT",
        deserialize_with = "null_as_default"
    )]
    pub amount: i32,
    #[serde(
        default,
        alias = "Note",
        alias = "NOTE",
        deserialize_with = "null_as_default"
    )]
    pub note: String,
    #[serde(
        default,
        alias = "Tags",
        alias = "TAGS",
        deserialize_with = "null_as_default"
    )]
    pub tags: Vec<String>,
}

impl Expense {
    /// Pair a stored id with the fields it was written with.
    pub fn with_id(id: i32, input: ExpenseInput) -> Self {
        Self {
            id,
            title: input.title,
            amount: input.amount,
            note: input.note,
            tags: input.tags,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_full_payload() {
        let input: ExpenseInput = serde_json::from_str(
            r#"{
                "title": "iPhone 17 Pro Max 2TB",
                "amount": 76900,
                "note": "birthday gift from my love",
                "tags": ["gadget"]
            }"#,
        )
        .unwrap();

        assert_eq!(input.title, "iPhone 17 Pro Max 2TB");
        assert_eq!(input.amount, 76900);
        assert_eq!(input.note, "birthday gift from my love");
        assert_eq!(input.tags, vec!["gadget".to_string()]);
    }

    #[test]
    fn ignores_caller_supplied_id() {
        let input: ExpenseInput =
            serde_json::from_str(r#"{"id": 99, "title": "coffee", "amount": 120}"#).unwrap();
        let expense = Expense::with_id(7, input);
        assert_eq!(expense.id, 7);
        assert_eq!(expense.title, "coffee");
    }

    #[test]
    fn missing_and_null_fields_default() {
        let input: ExpenseInput =
            serde_json::from_str(r#"{"title": "rent", "note": null}"#).unwrap();
        assert_eq!(input.amount, 0);
        assert_eq!(input.note, "");
        assert!(input.tags.is_empty());
    }

    #[test]
    fn binds_capitalized_keys() {
        let input: ExpenseInput = serde_json::from_str(
            r#"{"Title": "x", "AMOUNT": 5, "Note": "n", "Tags": ["a"]}"#,
        )
        .unwrap();
        assert_eq!(input.title, "x");
        assert_eq!(input.amount, 5);
        assert_eq!(input.note, "n");
        assert_eq!(input.tags, vec!["a".to_string()]);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(serde_json::from_str::<ExpenseInput>(r#"{"amount": "lots"}"#).is_err());
        assert!(serde_json::from_str::<ExpenseInput>(r#"{"tags": "gadget"}"#).is_err());
        assert!(serde_json::from_str::<ExpenseInput>(r#"{"amount": 1.5}"#).is_err());
    }

    #[test]
    fn serializes_with_id() {
        let expense = Expense::with_id(
            1,
            ExpenseInput {
                title: "book".into(),
                amount: 300,
                note: String::new(),
                tags: vec!["reading".into(), "gift".into()],
            },
        );
        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["tags"][1], "gift");
    }
}
