// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ExpenseError;

/// A document as the store hands it back: field names are the stored keys
/// (`amount`, `type`, `subtype`, `description`, `date`, `userId`, `id`).
pub type RawExpense = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub r#type: String,
    pub subtype: Option<String>,
    pub description: String,
    pub date: String, // ISO-8601, only the YYYY-MM-DD prefix is significant
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl Expense {
    /// The `YYYY-MM-DD` part of `date`, or the whole string if it is shorter.
    pub fn day(&self) -> &str {
        day_prefix(&self.date)
    }
}

pub fn day_prefix(date: &str) -> &str {
    match date.char_indices().nth(10) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// Fields supplied by the add/edit flow. Stored as a full document; edits overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub r#type: String,
    pub subtype: Option<String>,
    pub description: String,
    pub date: String,
}

impl NewExpense {
    pub fn to_document(&self, user_id: &str) -> RawExpense {
        let mut doc = RawExpense::new();
        doc.insert("amount".into(), serde_json::json!(self.amount));
        doc.insert("type".into(), self.r#type.clone().into());
        if let Some(sub) = &self.subtype {
            doc.insert("subtype".into(), sub.clone().into());
        }
        doc.insert("description".into(), self.description.clone().into());
        doc.insert("date".into(), self.date.clone().into());
        doc.insert("userId".into(), user_id.into());
        doc
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub r#type: Option<String>,
    pub year: Option<String>, // YYYY
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Type,
    #[default]
    Subtype,
    Description,
    Date,
}

impl FromStr for GroupBy {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "type" => Ok(GroupBy::Type),
            "subtype" => Ok(GroupBy::Subtype),
            "description" => Ok(GroupBy::Description),
            "date" => Ok(GroupBy::Date),
            _ => Err(ExpenseError::InvalidInput(format!(
                "Invalid group-by '{}'. Use: type, subtype, description, date",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrder {
    #[default]
    Insertion,
    ValueDesc,
    Label,
}

impl FromStr for SeriesOrder {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Ok(SeriesOrder::Insertion),
            "value" | "value_desc" | "value-desc" => Ok(SeriesOrder::ValueDesc),
            "label" => Ok(SeriesOrder::Label),
            _ => Err(ExpenseError::InvalidInput(format!(
                "Invalid order '{}'. Use: insertion, value, label",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: String,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    pub label: String,
    pub value: f64,
    pub color_index: usize,
}
