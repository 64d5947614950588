//! Gaussian kernel smoothing of gapped price series.
//!
//! Provider history has holes (weekends, holidays, outages), so the price "on"
//! a given date is estimated as a kernel-weighted average of the prices
//! around it. When the window around the target date holds no prices at all,
//! the same-width window is shifted backward one day at a time up to a
//! bounded number of retries.

use chrono::TimeDelta;
use ndarray::Array1;
use prisma_traits::{Date, Horizon, PrismaError, PriceSeries, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Largest accepted kernel std, in days.
pub const MAX_STD_DAYS: f64 = 3660.0;

/// Largest accepted window multiplier.
pub const MAX_WINDOW_MULTIPLIER: f64 = 10.0;

/// Largest accepted backward retry, in days.
pub const MAX_RETRY_DAYS: u32 = 366;

/// Configuration for temporal smoothing.
///
/// Longer horizons use wider kernels so single-day noise does not dominate a
/// multi-year trend estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoothingConfig {
    /// Half-width of the window in units of the kernel std (default: 3).
    pub window_multiplier: f64,

    /// Maximum backward shift, in days, tried when a window is empty (default: 7).
    pub max_retry_days: u32,

    /// Kernel std in days for the 1-month horizon (default: 1, a 6 day window).
    pub std_1m: f64,

    /// Kernel std in days for the 3-month horizon (default: 3, an 18 day window).
    pub std_3m: f64,

    /// Kernel std in days for the 1-year horizon (default: 12, a 2.4 month window).
    pub std_1y: f64,

    /// Kernel std in days for the 5-year horizon (default: 60, a 12 month window).
    pub std_5y: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_multiplier: 3.0,
            max_retry_days: 7,
            std_1m: 1.0,
            std_3m: 3.0,
            std_1y: 12.0,
            std_5y: 60.0,
        }
    }
}

impl SmoothingConfig {
    /// Kernel std in days for a horizon.
    #[must_use]
    pub const fn std_days(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::OneMonth => self.std_1m,
            Horizon::ThreeMonths => self.std_3m,
            Horizon::OneYear => self.std_1y,
            Horizon::FiveYears => self.std_5y,
        }
    }

    /// Check every value is usable.
    ///
    /// Kernel stds must be finite, positive and at most [`MAX_STD_DAYS`]; the
    /// window multiplier finite, positive and at most
    /// [`MAX_WINDOW_MULTIPLIER`]; the retry bound at most [`MAX_RETRY_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::Configuration`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        let k = self.window_multiplier;
        if !(k.is_finite() && k > 0.0 && k <= MAX_WINDOW_MULTIPLIER) {
            return Err(PrismaError::Configuration(format!(
                "smoothing: window_multiplier must be in (0, {MAX_WINDOW_MULTIPLIER}], got {k}"
            )));
        }
        if self.max_retry_days > MAX_RETRY_DAYS {
            return Err(PrismaError::Configuration(format!(
                "smoothing: max_retry_days must be at most {MAX_RETRY_DAYS}, got {}",
                self.max_retry_days
            )));
        }
        for horizon in Horizon::ALL {
            let std = self.std_days(horizon);
            if !(std.is_finite() && std > 0.0 && std <= MAX_STD_DAYS) {
                return Err(PrismaError::Configuration(format!(
                    "smoothing: {} std must be in (0, {MAX_STD_DAYS}] days, got {std}",
                    horizon.label()
                )));
            }
        }
        Ok(())
    }

    /// Half-width of the smoothing window in whole days for a given std.
    #[must_use]
    pub fn half_window_days(&self, std_days: f64) -> i64 {
        TemporalSmoother::from_config(self).half_window_days(std_days)
    }
}

/// Normal density centred at zero with a fixed std, in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    two_variance: f64,
    norm: f64,
}

impl GaussianKernel {
    /// Create a kernel, or `None` if `std_days` is not a positive finite number.
    #[must_use]
    pub fn new(std_days: f64) -> Option<Self> {
        if !std_days.is_finite() || std_days <= 0.0 {
            return None;
        }
        Some(Self {
            two_variance: 2.0 * std_days * std_days,
            norm: (2.0 * PI).sqrt() * std_days,
        })
    }

    /// Kernel weight at a signed day offset from the centre.
    #[must_use]
    pub fn weight(&self, offset_days: f64) -> f64 {
        (-(offset_days * offset_days) / self.two_variance).exp() / self.norm
    }

    /// Weight at the centre, `1 / (sqrt(2π)·std)`.
    #[must_use]
    pub fn peak(&self) -> f64 {
        1.0 / self.norm
    }
}

/// Kernel-weighted point estimates from a sparse date series.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalSmoother {
    window_multiplier: f64,
    max_retry_days: u32,
}

impl TemporalSmoother {
    /// Create a smoother with an explicit window multiplier and retry bound.
    #[must_use]
    pub const fn new(window_multiplier: f64, max_retry_days: u32) -> Self {
        Self {
            window_multiplier,
            max_retry_days,
        }
    }

    /// Create a smoother from a smoothing configuration.
    #[must_use]
    pub const fn from_config(config: &SmoothingConfig) -> Self {
        Self::new(config.window_multiplier, config.max_retry_days)
    }

    /// Window multiplier `k`.
    #[must_use]
    pub const fn window_multiplier(&self) -> f64 {
        self.window_multiplier
    }

    /// Maximum number of backward retry shifts.
    #[must_use]
    pub const fn max_retry_days(&self) -> u32 {
        self.max_retry_days
    }

    /// Half-width of the window in whole days: `floor(k · std)`.
    #[must_use]
    pub fn half_window_days(&self, std_days: f64) -> i64 {
        let half = (self.window_multiplier * std_days).floor();
        if half.is_finite() && half > 0.0 {
            half as i64
        } else {
            0
        }
    }

    /// Estimate the series value at `mean` with a kernel of `std_days`.
    ///
    /// Returns `None` when `std_days` is not positive, when the window does not
    /// fit the calendar, or when neither the window around `mean` nor any of
    /// its backward shifts contain a price.
    pub fn smooth(&self, series: &PriceSeries, mean: Date, std_days: f64) -> Option<f64> {
        let kernel = GaussianKernel::new(std_days)?;
        let half = self.half_window_days(std_days);

        for shift in 0..=i64::from(self.max_retry_days) {
            let centre = mean.checked_sub_signed(TimeDelta::try_days(shift)?)?;
            if let Some(estimate) = Self::window_estimate(series, centre, half, &kernel) {
                if shift > 0 {
                    tracing::debug!(%mean, shift, "smoothing window shifted back");
                }
                return Some(estimate);
            }
        }

        tracing::debug!(%mean, std_days, "no prices within any smoothing window");
        None
    }

    fn window_estimate(
        series: &PriceSeries,
        centre: Date,
        half: i64,
        kernel: &GaussianKernel,
    ) -> Option<f64> {
        let half = TimeDelta::try_days(half)?;
        let start = centre.checked_sub_signed(half)?;
        let end = centre.checked_add_signed(half)?;

        let (offsets, prices): (Vec<f64>, Vec<f64>) = series
            .range(start, end)
            .map(|(date, price)| ((date - centre).num_days() as f64, price))
            .unzip();
        if prices.is_empty() {
            return None;
        }

        let weights = Array1::from_vec(offsets).mapv(|x| kernel.weight(x));
        let total = weights.sum();
        if !(total.is_finite() && total > 0.0) {
            return None;
        }

        // Averaging deviations from the first price keeps a single point, or
        // a flat window, exact.
        let base = prices[0];
        let deviations = Array1::from_vec(prices).mapv(|p| p - base);
        Some(base + weights.dot(&deviations) / total)
    }
}

impl Default for TemporalSmoother {
    fn default() -> Self {
        Self::from_config(&SmoothingConfig::default())
    }
}
