//! Percentage price change over fixed lookback horizons.

use chrono::{Months, TimeDelta};
use prisma_traits::{Date, Horizon, PerformanceRecord, PriceSeries, Result};

use crate::smoothing::{SmoothingConfig, TemporalSmoother};

/// Derives a [`PerformanceRecord`] from a price series.
///
/// For each horizon both endpoints are smoothed with the horizon's kernel
/// std, and the change is `(now - then) / then`. Changes over horizons longer
/// than a year are annualized by `12 / months`. An undefined endpoint, or a
/// historical price of exactly zero, leaves the horizon undefined.
///
/// # Example
///
/// ```ignore
/// use prisma_assets::PerformanceEstimator;
///
/// let estimator = PerformanceEstimator::default();
/// let record = estimator.estimate(&prices, today);
/// let one_year = record.get(Horizon::OneYear);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PerformanceEstimator {
    config: SmoothingConfig,
    smoother: TemporalSmoother,
}

impl PerformanceEstimator {
    /// Create an estimator with the given smoothing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`](prisma_traits::PrismaError::Configuration)
    /// if the configuration fails [`SmoothingConfig::validate`].
    pub fn new(config: SmoothingConfig) -> Result<Self> {
        config.validate()?;
        let smoother = TemporalSmoother::from_config(&config);
        Ok(Self { config, smoother })
    }

    /// The smoothing configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Change over one horizon ending at `today`.
    #[must_use]
    pub fn change(&self, prices: &PriceSeries, today: Date, horizon: Horizon) -> Option<f64> {
        let std_days = self.config.std_days(horizon);
        let then_date = today.checked_sub_months(Months::new(horizon.months()))?;

        let now = self.smoother.smooth(prices, today, std_days)?;
        let then = self.smoother.smooth(prices, then_date, std_days)?;

        if then == 0.0 {
            tracing::debug!(%horizon, %then_date, "zero reference price, change undefined");
            return None;
        }

        let mut change = (now - then) / then;
        if horizon.is_annualized() {
            change *= 12.0 / f64::from(horizon.months());
        }
        change.is_finite().then_some(change)
    }

    /// Changes over every horizon ending at `today`.
    #[must_use]
    pub fn estimate(&self, prices: &PriceSeries, today: Date) -> PerformanceRecord {
        Horizon::ALL
            .into_iter()
            .map(|h| (h, self.change(prices, today, h)))
            .collect()
    }

    /// Earliest date a caller must fetch so every horizon's window is covered.
    ///
    /// This is `today`, minus the longest horizon, minus that horizon's half
    /// window, minus the retry allowance.
    #[must_use]
    pub fn history_start(&self, today: Date) -> Option<Date> {
        let longest = Horizon::FiveYears;
        let half = self
            .smoother
            .half_window_days(self.config.std_days(longest));
        let slack = half.checked_add(i64::from(self.config.max_retry_days))?;
        today
            .checked_sub_months(Months::new(longest.months()))?
            .checked_sub_signed(TimeDelta::try_days(slack)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::smoothing::{MAX_RETRY_DAYS, MAX_STD_DAYS, MAX_WINDOW_MULTIPLIER};
    use chrono::Datelike;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    /// Business-day series from `start` to `end` with a price per date.
    fn business_days(start: Date, end: Date, price: impl Fn(Date) -> f64) -> PriceSeries {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| day.weekday().number_from_monday() <= 5)
            .map(|day| (day, price(day)))
            .collect()
    }

    #[test]
    fn test_flat_series_has_zero_change() {
        let today = d(2025, 6, 13);
        let estimator = PerformanceEstimator::default();
        let start = estimator.history_start(today).unwrap();
        let prices = business_days(start, today, |_| 42.5);

        let record = estimator.estimate(&prices, today);
        for horizon in Horizon::ALL {
            assert_eq!(record.get(horizon), Some(0.0), "horizon {horizon}");
        }
    }

    #[test]
    fn test_five_year_change_is_annualized() {
        let today = d(2025, 6, 13);
        let step = d(2023, 1, 1);
        let estimator = PerformanceEstimator::default();
        let start = estimator.history_start(today).unwrap();
        let prices = business_days(start, today, |day| if day < step { 100.0 } else { 200.0 });

        let record = estimator.estimate(&prices, today);
        // raw five-year change is 1.0; annualized it is 1.0 * 12 / 60
        assert_relative_eq!(record.get(Horizon::FiveYears).unwrap(), 0.2);
        assert_eq!(record.get(Horizon::OneYear), Some(0.0));
        assert_eq!(record.get(Horizon::OneMonth), Some(0.0));
    }

    #[test]
    fn test_short_horizon_is_not_annualized() {
        let today = d(2025, 6, 13);
        let step = d(2025, 5, 1);
        let estimator = PerformanceEstimator::default();
        let start = estimator.history_start(today).unwrap();
        let prices = business_days(start, today, |day| if day < step { 80.0 } else { 100.0 });

        let record = estimator.estimate(&prices, today);
        assert_relative_eq!(record.get(Horizon::ThreeMonths).unwrap(), 0.25);
        assert_relative_eq!(record.get(Horizon::OneYear).unwrap(), 0.25);
    }

    #[test]
    fn test_zero_reference_price_is_undefined() {
        let today = d(2025, 6, 13);
        let step = d(2023, 1, 1);
        let estimator = PerformanceEstimator::default();
        let start = estimator.history_start(today).unwrap();
        let prices = business_days(start, today, |day| if day < step { 0.0 } else { 10.0 });

        let record = estimator.estimate(&prices, today);
        assert_eq!(record.get(Horizon::FiveYears), None);
        assert_eq!(record.get(Horizon::OneYear), Some(0.0));
    }

    #[test]
    fn test_short_history_leaves_long_horizons_undefined() {
        let today = d(2025, 6, 13);
        let prices = business_days(d(2025, 1, 1), today, |_| 10.0);

        let record = PerformanceEstimator::default().estimate(&prices, today);
        assert_eq!(record.get(Horizon::OneMonth), Some(0.0));
        assert_eq!(record.get(Horizon::ThreeMonths), Some(0.0));
        assert_eq!(record.get(Horizon::OneYear), None);
        assert_eq!(record.get(Horizon::FiveYears), None);
    }

    #[test]
    fn test_history_start() {
        let estimator = PerformanceEstimator::default();
        // 60 months back, then 180 + 7 days
        let start = estimator.history_start(d(2025, 6, 13)).unwrap();
        assert_eq!(start, d(2020, 6, 13) - TimeDelta::days(187));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let huge = SmoothingConfig {
            std_5y: 1e15,
            ..SmoothingConfig::default()
        };
        assert!(PerformanceEstimator::new(huge).is_err());

        let zero = SmoothingConfig {
            std_1y: 0.0,
            ..SmoothingConfig::default()
        };
        assert!(PerformanceEstimator::new(zero).is_err());

        let widest = SmoothingConfig {
            window_multiplier: MAX_WINDOW_MULTIPLIER,
            max_retry_days: MAX_RETRY_DAYS,
            std_5y: MAX_STD_DAYS,
            ..SmoothingConfig::default()
        };
        let estimator = PerformanceEstimator::new(widest).unwrap();
        assert!(estimator.history_start(d(2025, 6, 13)).is_some());
    }
}
