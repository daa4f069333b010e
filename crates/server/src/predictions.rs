//! Prediction API endpoint

use api_types::{
    prediction::{PredictionRequest, PredictionResponse},
    transaction::{Amount, TransactionRecord},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use engine::{EngineError, Transaction};

use crate::{ServerError, server::ServerState};

fn map_amount(amount: &Amount) -> Result<f64, EngineError> {
    match amount {
        Amount::Number(value) => Ok(*value),
        Amount::Text(text) => engine::parse_amount(text),
    }
}

fn map_record(record: &TransactionRecord) -> Result<Transaction, EngineError> {
    Transaction::parse(&record.date, &record.kind, map_amount(&record.amount)?)
}

/// Handle requests for the next period expense prediction
pub async fn predict(
    State(state): State<ServerState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ServerError> {
    let Json(payload) = payload.map_err(|err| ServerError::Malformed(err.body_text()))?;

    let transactions = payload
        .transactions
        .iter()
        .map(map_record)
        .collect::<Result<Vec<_>, _>>()?;

    let prediction = state.predictor.predict(&transactions)?;
    tracing::debug!(
        transactions = transactions.len(),
        predicted_expense = prediction.amount,
        "prediction served"
    );

    Ok(Json(PredictionResponse {
        predicted_expense: prediction.amount,
    }))
}
