// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpenseError {
    /// The record's amount (or date) could not be turned into something we can aggregate.
    #[error("Malformed expense record '{id}': {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("No active user; log in first")]
    NoActiveUser,

    #[error("Failed to fetch expenses: {0}")]
    UpstreamFetchFailure(String),

    #[error("Expense '{0}' not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<rusqlite::Error> for ExpenseError {
    fn from(value: rusqlite::Error) -> Self {
        ExpenseError::UpstreamFetchFailure(value.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(value: serde_json::Error) -> Self {
        ExpenseError::UpstreamFetchFailure(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
