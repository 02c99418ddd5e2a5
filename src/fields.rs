use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::LibibError;

/// Open mapping of field name to value used by patron create/update.
pub type Fields = BTreeMap<String, Value>;

/// Field names the patron create/update endpoints accept.
pub const PATRON_FIELDS: [&str; 16] = [
    "barcode",
    "first_name",
    "last_name",
    "email",
    "notification_emails",
    "tags",
    "patron_id",
    "phone",
    "address1",
    "address2",
    "city",
    "state",
    "country",
    "zip",
    "freeze",
    "password",
];

/// Collects caller-supplied pairs into a [`Fields`] mapping.
///
/// Later duplicates replace earlier ones.
pub(crate) fn collect_fields<I, K, V>(fields: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Keeps only the allow-listed patron fields and encodes them as query pairs.
///
/// Fails with [`LibibError::NoData`] when nothing was supplied and with
/// [`LibibError::InvalidFields`] when nothing survived the allow-list.
pub(crate) fn patron_query(fields: Fields) -> Result<Vec<(String, String)>, LibibError> {
    if fields.is_empty() {
        return Err(LibibError::NoData);
    }

    let (allowed, rejected): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .partition(|(name, _)| PATRON_FIELDS.contains(&name.as_str()));
    let rejected: Vec<String> = rejected.into_iter().map(|(name, _)| name).collect();

    if allowed.is_empty() {
        return Err(LibibError::InvalidFields(rejected));
    }
    if !rejected.is_empty() {
        warn!(fields = ?rejected, "dropping unrecognised patron fields");
    }

    let mut query = Vec::with_capacity(allowed.len());
    for (name, value) in allowed {
        push_query_value(&mut query, &name, value);
    }
    Ok(query)
}

// Nulls are omitted and arrays become repeated keys.
fn push_query_value(query: &mut Vec<(String, String)>, name: &str, value: Value) {
    match value {
        Value::Null => {}
        Value::String(text) => query.push((name.to_owned(), text)),
        Value::Array(items) => {
            for item in items {
                push_query_value(query, name, item);
            }
        }
        other => query.push((name.to_owned(), other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{Fields, collect_fields, patron_query};
    use crate::LibibError;

    #[test]
    fn empty_fields_report_no_data() {
        let error = patron_query(Fields::new()).expect_err("nothing to send");
        assert!(matches!(error, LibibError::NoData));
    }

    #[test]
    fn only_unknown_fields_report_invalid_data() {
        let fields = collect_fields([("nickname", "Mo"), ("age", "40")]);
        let error = patron_query(fields).expect_err("nothing allowed");
        match error {
            LibibError::InvalidFields(names) => assert_eq!(names, ["age", "nickname"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let fields = collect_fields([
            ("first_name", json!("Mary")),
            ("nickname", json!("Mo")),
            ("freeze", json!(1)),
        ]);
        let query = patron_query(fields).expect("has allowed fields");
        assert_eq!(
            query,
            [
                ("first_name".to_owned(), "Mary".to_owned()),
                ("freeze".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn nulls_are_omitted_and_arrays_repeat_the_key() {
        let fields = collect_fields([
            ("tags", json!(["fiction", "staff"])),
            ("phone", Value::Null),
        ]);
        let query = patron_query(fields).expect("has allowed fields");
        assert_eq!(
            query,
            [
                ("tags".to_owned(), "fiction".to_owned()),
                ("tags".to_owned(), "staff".to_owned()),
            ]
        );
    }
}
