//! Expense prediction engine.
//!
//! Given a batch of transactions, fits an ordinary least squares line of
//! expense amount against days elapsed since the earliest transaction and
//! extrapolates it past the last expense.

pub use dates::parse_date;
pub use error::EngineError;
pub use regression::LinearTrend;
pub use transactions::{Transaction, TransactionKind, parse_amount};

mod dates;
mod error;
mod regression;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// Days past the last expense at which the trend is evaluated.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Outcome of a successful prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Predicted expense, rounded to 2 decimals.
    pub amount: f64,
    /// Day (from the batch baseline) the trend was evaluated at.
    pub target_day: i64,
    pub trend: LinearTrend,
}

/// Stateless predictor. Safe to share between concurrent requests.
#[derive(Clone, Debug)]
pub struct Predictor {
    horizon_days: u32,
}

impl Default for Predictor {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl Predictor {
    /// Return a builder for `Predictor`. Help to build the struct.
    pub fn builder() -> PredictorBuilder {
        PredictorBuilder::default()
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Predict the expense `horizon_days` after the last expense.
    ///
    /// The day-zero baseline is the earliest date of the whole batch, whatever
    /// its kind, while the line is fit on expenses only.
    ///
    /// ```rust
    /// use engine::{Predictor, Transaction};
    ///
    /// let txs = [
    ///     Transaction::parse("2025-01-01", "expense", 100.0).unwrap(),
    ///     Transaction::parse("2025-01-11", "expense", 200.0).unwrap(),
    ///     Transaction::parse("2025-01-21", "expense", 300.0).unwrap(),
    /// ];
    /// let prediction = Predictor::default().predict(&txs).unwrap();
    /// assert_eq!(prediction.amount, 600.0);
    /// ```
    pub fn predict(&self, transactions: &[Transaction]) -> ResultEngine<Prediction> {
        let expenses = transactions.iter().filter(|tx| tx.kind.is_expense()).count();
        if expenses < regression::MIN_OBSERVATIONS {
            return Err(EngineError::InsufficientData {
                required: regression::MIN_OBSERVATIONS,
                actual: expenses,
            });
        }

        let baseline = transactions
            .iter()
            .map(|tx| tx.occurred_at)
            .min()
            .ok_or(EngineError::InsufficientData {
                required: regression::MIN_OBSERVATIONS,
                actual: 0,
            })?;

        let points: Vec<(i64, f64)> = transactions
            .iter()
            .filter(|tx| tx.kind.is_expense())
            .map(|tx| (dates::elapsed_days(baseline, tx.occurred_at), tx.amount))
            .collect();

        let last_day = points.iter().map(|(day, _)| *day).max().unwrap_or_default();
        let target_day = last_day + i64::from(self.horizon_days);

        let features: Vec<(f64, f64)> = points
            .iter()
            .map(|(day, amount)| (*day as f64, *amount))
            .collect();
        let trend = LinearTrend::fit(&features)?;

        let predicted = trend.predict_at(target_day as f64);
        if !predicted.is_finite() {
            return Err(EngineError::Numerical(format!(
                "prediction at day {target_day} is not finite"
            )));
        }

        tracing::debug!(
            expenses,
            slope = trend.slope(),
            intercept = trend.intercept(),
            r_squared = trend.r_squared(&features),
            target_day,
            "fitted expense trend"
        );

        Ok(Prediction {
            amount: round_cents(predicted),
            target_day,
            trend,
        })
    }
}

/// Predict with the default 30 day horizon.
pub fn predict(transactions: &[Transaction]) -> ResultEngine<Prediction> {
    Predictor::default().predict(transactions)
}

/// Round to 2 decimals on the exact binary value, ties to even.
///
/// `1.115` is stored as `1.11499999...` and rounds down to `1.11`.
pub fn round_cents(value: f64) -> f64 {
    let rounded = format!("{value:.2}").parse().unwrap_or(value);
    // avoid "-0.0" on the wire
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[derive(Debug)]
pub struct PredictorBuilder {
    horizon_days: u32,
}

impl Default for PredictorBuilder {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl PredictorBuilder {
    /// Days past the last expense to extrapolate to.
    pub fn horizon_days(mut self, days: u32) -> PredictorBuilder {
        self.horizon_days = days;
        self
    }

    /// Construct `Predictor`
    pub fn build(self) -> Predictor {
        Predictor {
            horizon_days: self.horizon_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, kind: &str, amount: f64) -> Transaction {
        Transaction::parse(date, kind, amount).unwrap()
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.235_000_1), 1.24);
        assert_eq!(round_cents(-2.006), -2.01);
        assert_eq!(round_cents(-0.001), 0.0);
        assert!(round_cents(-0.001).is_sign_positive());
    }

    #[test]
    fn rounds_exact_decimal_value() {
        assert_eq!(round_cents(0.125), 0.12);
        assert_eq!(round_cents(1.115), 1.11);
        assert_eq!(round_cents(-0.125), -0.12);
        assert_eq!(round_cents(0.375), 0.38);
    }

    #[test]
    fn flat_expenses_round_like_their_level() {
        let txs = [
            tx("2025-01-01", "expense", 1.115),
            tx("2025-01-02", "expense", 1.115),
        ];
        assert_eq!(predict(&txs).unwrap().amount, 1.11);
    }

    #[test]
    fn builder_sets_horizon() {
        assert_eq!(Predictor::builder().build().horizon_days(), 30);
        assert_eq!(Predictor::builder().horizon_days(7).build().horizon_days(), 7);
    }

    #[test]
    fn custom_horizon() {
        let txs = [
            tx("2025-01-01", "expense", 100.0),
            tx("2025-01-11", "expense", 200.0),
        ];
        let prediction = Predictor::builder()
            .horizon_days(0)
            .build()
            .predict(&txs)
            .unwrap();
        assert_eq!(prediction.target_day, 10);
        assert_eq!(prediction.amount, 200.0);
    }

    #[test]
    fn target_day_is_last_expense_plus_horizon() {
        let txs = [
            tx("2025-01-01", "expense", 10.0),
            tx("2025-01-05", "expense", 20.0),
            // later income does not move the target
            tx("2025-03-01", "income", 1000.0),
        ];
        let prediction = predict(&txs).unwrap();
        assert_eq!(prediction.target_day, 34);
        assert_eq!(prediction.trend.observations(), 2);
    }

    #[test]
    fn unsorted_input() {
        let txs = [
            tx("2025-01-21", "expense", 300.0),
            tx("2025-01-01", "expense", 100.0),
            tx("2025-01-11", "expense", 200.0),
        ];
        assert_eq!(predict(&txs).unwrap().amount, 600.0);
    }

    #[test]
    fn same_day_expenses_predict_their_mean() {
        let txs = [
            tx("2025-01-01T08:00:00", "expense", 10.0),
            tx("2025-01-01T20:00:00", "expense", 20.0),
        ];
        let prediction = predict(&txs).unwrap();
        assert_eq!(prediction.amount, 15.0);
        assert_eq!(prediction.trend.slope(), 0.0);
    }

    #[test]
    fn one_expense_is_insufficient() {
        let txs = [
            tx("2025-01-01", "income", 10.0),
            tx("2025-01-02", "expense", 20.0),
        ];
        assert_eq!(
            predict(&txs),
            Err(EngineError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
    }
}
