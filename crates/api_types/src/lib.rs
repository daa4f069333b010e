use serde::{Deserialize, Serialize};

/// Body returned alongside every non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod transaction {
    use super::*;

    /// Amount as sent by clients.
    ///
    /// Most clients send a JSON number; a decimal string (`"12.50"`) is
    /// accepted as well and parsed by the server.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum Amount {
        Number(f64),
        Text(String),
    }

    impl From<f64> for Amount {
        fn from(value: f64) -> Self {
            Self::Number(value)
        }
    }

    /// A single transaction as stored by the bookkeeping backend.
    ///
    /// Extra fields (ids, category, notes, ...) are ignored.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionRecord {
        /// Calendar date or timestamp, e.g. `2025-08-20` or
        /// `2025-08-20T02:48:00.000Z`.
        pub date: String,
        /// Transaction tag; only `"expense"` feeds the prediction.
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: Amount,
    }
}

pub mod prediction {
    use super::*;
    use crate::transaction::TransactionRecord;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PredictionRequest {
        /// A missing list is the same as an empty one.
        #[serde(default)]
        pub transactions: Vec<TransactionRecord>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PredictionResponse {
        /// Expected expense past the last one (30 days by default), rounded to cents.
        pub predicted_expense: f64,
    }
}
