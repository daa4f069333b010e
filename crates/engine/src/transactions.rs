//! Transaction primitives.
//!
//! A `Transaction` is a dated, tagged amount. Only expenses feed the trend,
//! but every transaction takes part in choosing the day-zero baseline.

use chrono::NaiveDateTime;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    /// Any other tag sent by the client, kept verbatim.
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        match value {
            "income" => Self::Income,
            "expense" => Self::Expense,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub occurred_at: NaiveDateTime,
    pub kind: TransactionKind,
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        occurred_at: NaiveDateTime,
        kind: TransactionKind,
        amount: f64,
    ) -> ResultEngine<Self> {
        if !amount.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be a finite number, got {amount}"
            )));
        }
        Ok(Self {
            occurred_at,
            kind,
            amount,
        })
    }

    /// Build a transaction from its textual date and tag.
    pub fn parse(date: &str, kind: &str, amount: f64) -> ResultEngine<Self> {
        Self::new(crate::parse_date(date)?, TransactionKind::from(kind), amount)
    }
}

/// Parse an amount sent as text (`"12.50"`).
pub fn parse_amount(value: &str) -> ResultEngine<f64> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| EngineError::InvalidAmount(format!("\"{value}\" is not a number")))?;
    if !amount.is_finite() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be a finite number, got {value}"
        )));
    }
    Ok(amount)
}
