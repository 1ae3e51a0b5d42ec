// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::Value;

use crate::errors::{ExpenseError, Result};
use crate::models::{Expense, RawExpense};

/// Coerce a stored document into a canonical [`Expense`].
///
/// Amounts may be stored as JSON numbers or as numeric strings; both must be
/// finite. Missing `subtype`/`description` are tolerated.
pub fn normalize(raw: &RawExpense) -> Result<Expense> {
    let id = string_field(raw, "id").unwrap_or_default();

    let amount = parse_amount(raw.get("amount")).ok_or_else(|| ExpenseError::MalformedRecord {
        id: id.clone(),
        reason: format!("amount {} is not a finite number", describe(raw.get("amount"))),
    })?;

    let date = string_field(raw, "date")
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ExpenseError::MalformedRecord {
            id: id.clone(),
            reason: "missing date".to_string(),
        })?;

    let subtype = string_field(raw, "subtype").filter(|s| !s.trim().is_empty());

    Ok(Expense {
        id,
        amount,
        r#type: string_field(raw, "type").unwrap_or_default(),
        subtype,
        description: string_field(raw, "description").unwrap_or_default(),
        date,
        user_id: string_field(raw, "userId").unwrap_or_default(),
    })
}

fn parse_amount(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let t = s.trim();
            // f64::from_str accepts "inf"/"NaN"; reject anything that is not plain digits.
            if !t.chars().any(|c| c.is_ascii_digit()) {
                return None;
            }
            t.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn string_field(raw: &RawExpense, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn describe(v: Option<&Value>) -> String {
    match v {
        None => "(missing)".to_string(),
        Some(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> RawExpense {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let e = normalize(&doc(json!({
            "id": "a", "amount": " 42.5 ", "type": "cash", "date": "2025-01-05T10:00:00.000Z"
        })))
        .unwrap();
        assert_eq!(e.amount, 42.5);
        assert_eq!(e.day(), "2025-01-05");
        assert_eq!(e.subtype, None);
        assert_eq!(e.description, "");
    }

    #[test]
    fn non_numeric_amounts_are_malformed() {
        for bad in [json!("abc"), json!("NaN"), json!("inf"), json!(""), json!(null), json!(true)] {
            let err = normalize(&doc(json!({"id": "x", "amount": bad, "date": "2025-01-01"})))
                .unwrap_err();
            assert!(matches!(err, ExpenseError::MalformedRecord { ref id, .. } if id == "x"));
        }
    }

    #[test]
    fn missing_date_is_malformed() {
        let err = normalize(&doc(json!({"amount": 10}))).unwrap_err();
        assert!(err.to_string().contains("missing date"));
        for blank in ["", "   "] {
            let err = normalize(&doc(json!({"amount": 10, "date": blank}))).unwrap_err();
            assert!(err.to_string().contains("missing date"));
        }
    }

    #[test]
    fn blank_subtype_becomes_none() {
        let e = normalize(&doc(json!({
            "amount": 1, "type": "upi", "subtype": "  ", "date": "2025-01-01"
        })))
        .unwrap();
        assert_eq!(e.subtype, None);
    }
}
