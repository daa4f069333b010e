//! Ordinary least squares fit of a straight line.
//!
//! Fits `y = intercept + slope * x` on `(x, y)` pairs using the centered
//! closed-form solution.

use crate::{EngineError, ResultEngine};

/// Minimum number of points needed to fit a line.
pub const MIN_OBSERVATIONS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearTrend {
    intercept: f64,
    slope: f64,
    observations: usize,
}

impl LinearTrend {
    /// Fit the line minimizing the sum of squared residuals.
    ///
    /// When every `x` is the same the slope is undefined; the minimum-norm
    /// solution is returned instead: a flat line at the mean of `y`.
    ///
    /// ```rust
    /// use engine::LinearTrend;
    ///
    /// let trend = LinearTrend::fit(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]).unwrap();
    /// assert!((trend.slope() - 2.0).abs() < 1e-12);
    /// assert!((trend.predict_at(3.0) - 7.0).abs() < 1e-12);
    /// ```
    pub fn fit(points: &[(f64, f64)]) -> ResultEngine<Self> {
        if points.len() < MIN_OBSERVATIONS {
            return Err(EngineError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: points.len(),
            });
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        let intercept = mean_y - slope * mean_x;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(EngineError::Numerical(
                "linear fit produced a non-finite coefficient".to_string(),
            ));
        }

        Ok(Self {
            intercept,
            slope,
            observations: points.len(),
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Change of `y` per unit of `x` (per day).
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn predict_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Coefficient of determination over `points`.
    ///
    /// A constant `y` is explained perfectly and yields `1.0`.
    pub fn r_squared(&self, points: &[(f64, f64)]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / points.len() as f64;
        let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|(x, y)| (y - self.predict_at(*x)).powi(2))
            .sum();

        if ss_tot > 1e-10 {
            1.0 - ss_res / ss_tot
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn exact_line() {
        let points = [(0.0, 100.0), (10.0, 200.0), (20.0, 300.0)];
        let trend = LinearTrend::fit(&points).unwrap();
        assert!(close(trend.slope(), 10.0));
        assert!(close(trend.intercept(), 100.0));
        assert!(close(trend.r_squared(&points), 1.0));
        assert_eq!(trend.observations(), 3);
    }

    #[test]
    fn noisy_points() {
        // y = 2x + 1 with symmetric noise
        let points = [(0.0, 2.0), (1.0, 2.0), (2.0, 6.0), (3.0, 6.0)];
        let trend = LinearTrend::fit(&points).unwrap();
        assert!(close(trend.slope(), 1.6));
        assert!(close(trend.intercept(), 1.6));
        let r2 = trend.r_squared(&points);
        assert!(r2 > 0.0 && r2 < 1.0);
    }

    #[test]
    fn negative_slope() {
        let trend = LinearTrend::fit(&[(0.0, 50.0), (5.0, 25.0)]).unwrap();
        assert!(close(trend.slope(), -5.0));
        assert!(close(trend.predict_at(10.0), 0.0));
    }

    #[test]
    fn same_x_gives_flat_mean() {
        let trend = LinearTrend::fit(&[(4.0, 10.0), (4.0, 30.0), (4.0, 20.0)]).unwrap();
        assert_eq!(trend.slope(), 0.0);
        assert!(close(trend.intercept(), 20.0));
        assert!(close(trend.predict_at(100.0), 20.0));
    }

    #[test]
    fn too_few_points() {
        assert_eq!(
            LinearTrend::fit(&[(0.0, 1.0)]),
            Err(EngineError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            LinearTrend::fit(&[]),
            Err(EngineError::InsufficientData {
                required: 2,
                actual: 0
            })
        );
    }

    #[test]
    fn overflowing_values_are_rejected() {
        let err = LinearTrend::fit(&[(0.0, f64::MAX), (1.0, -f64::MAX)]).unwrap_err();
        assert!(matches!(err, EngineError::Numerical(_)));
    }
}
