//! WHERE conditions.
//!
//! Conditions form a flat chain: each one is appended to the text of the previous ones,
//! joined by the connector of the call. No parentheses are ever inserted, so
//! `a = ? OR b = ? AND c = ?` is handed to the database exactly as written and follows
//! the database's own AND/OR precedence.

use crate::value::Value;
use std::fmt;

/// How a condition is joined to the conditions before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        })
    }
}

/// A single comparison: `column operator ?` with one bound value.
///
/// The operator is free-form text (`=`, `>`, `LIKE`, `!=`, ...) and is not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: String,
    pub value: Value,
}

impl Condition {
    /// Create a condition with an explicit operator.
    pub fn new(column: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Create an equality condition (`column = ?`).
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, "=", value)
    }
}

/// Accumulated WHERE text, built left to right.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConditionChain {
    text: String,
}

impl ConditionChain {
    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    /// Append `column op ?`, joined by `connector` unless this is the first condition.
    pub(crate) fn push(&mut self, connector: Connector, column: &str, operator: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
            self.text.push_str(&connector.to_string());
            self.text.push(' ');
        }
        self.text.push_str(column);
        self.text.push(' ');
        self.text.push_str(operator);
        self.text.push_str(" ?");
    }

    /// Append `column IN ( ?, ?, ... )` with `count` placeholders.
    pub(crate) fn push_in(&mut self, column: &str, count: usize) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(column);
        self.text.push_str(" IN ");
        self.text.push_str(&placeholder_group(count));
    }
}

/// Render `( ?, ?, ... )` with `count` placeholders.
pub(crate) fn placeholder_group(count: usize) -> String {
    format!("( {} )", vec!["?"; count].join(", "))
}
