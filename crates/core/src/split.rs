//! Train/validation/test ratio balancing.
//!
//! [`SplitConfiguration`] holds three integer percentages that must sum
//! to [`RATIO_TOTAL`] after every edit. Edits go through
//! [`SplitConfiguration::set_train`] and
//! [`SplitConfiguration::set_validation`], which rebalance the dependent
//! fields. [`SplitConfiguration::validate`] is the pre-submit check for
//! configurations assembled by other means.

use crate::error::CoreError;
use crate::messages;

/// The three ratios always add up to this.
pub const RATIO_TOTAL: u32 = 100;

// ---------------------------------------------------------------------------
// Slider bounds
// ---------------------------------------------------------------------------

/// Inclusive bounds and step of a ratio slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl SliderRange {
    /// Snap `value` to the nearest step (ties round up) and clamp it to
    /// `[min, max]`.
    pub fn clamp(&self, value: u32) -> u32 {
        let value = value.clamp(self.min, self.max);
        if self.step <= 1 {
            return value;
        }
        let offset = value - self.min;
        let snapped = self.min + (offset + self.step / 2) / self.step * self.step;
        snapped.min(self.max)
    }
}

pub const TRAIN_RANGE: SliderRange = SliderRange {
    min: 40,
    max: 80,
    step: 5,
};

pub const VALIDATION_RANGE: SliderRange = SliderRange {
    min: 10,
    max: 40,
    step: 5,
};

// ---------------------------------------------------------------------------
// SplitConfiguration
// ---------------------------------------------------------------------------

/// Partition percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfiguration {
    pub train: u32,
    pub validation: u32,
    pub test: u32,
}

impl Default for SplitConfiguration {
    fn default() -> Self {
        Self {
            train: 60,
            validation: 20,
            test: 20,
        }
    }
}

impl SplitConfiguration {
    pub fn sum(&self) -> u32 {
        self.train + self.validation + self.test
    }

    /// Set the train ratio and split the remainder between validation
    /// and test. Validation receives the rounded half and test the exact
    /// remainder, so rounding never breaks the total.
    pub fn set_train(&mut self, train: u32) {
        let train = TRAIN_RANGE.clamp(train);
        let remaining = RATIO_TOTAL - train;
        let validation = (remaining + 1) / 2;
        self.train = train;
        self.validation = validation;
        self.test = remaining - validation;
    }

    /// Set the validation ratio with train held fixed; test absorbs the
    /// difference.
    ///
    /// The value is also capped at `100 - train` so test never goes
    /// negative.
    pub fn set_validation(&mut self, validation: u32) {
        let remaining = RATIO_TOTAL.saturating_sub(self.train);
        let validation = VALIDATION_RANGE.clamp(validation).min(remaining);
        self.validation = validation;
        self.test = remaining - validation;
    }

    /// Pre-submit check: the ratios must add up to exactly 100.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.sum() != RATIO_TOTAL {
            return Err(CoreError::Validation(
                messages::RATIOS_MUST_SUM_TO_100.to_string(),
            ));
        }
        Ok(())
    }

    /// Ratios as fractions of one, in train/validation/test order.
    pub fn fractions(&self) -> (f64, f64, f64) {
        let total = RATIO_TOTAL as f64;
        (
            self.train as f64 / total,
            self.validation as f64 / total,
            self.test as f64 / total,
        )
    }
}

// ---------------------------------------------------------------------------
// Local size preview
// ---------------------------------------------------------------------------

/// Partition sizes predicted locally from the configured ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: u64,
    pub validation: u64,
    pub test: u64,
}

/// Predict partition sizes as `round(dataset_size * ratio / 100)` each.
///
/// Sizes are rounded independently, so their sum may differ from
/// `dataset_size` by one or two records.
pub fn preview_sizes(dataset_size: u64, config: &SplitConfiguration) -> SplitSizes {
    let size_for = |ratio: u32| {
        (dataset_size as f64 * ratio as f64 / RATIO_TOTAL as f64).round() as u64
    };
    SplitSizes {
        train: size_for(config.train),
        validation: size_for(config.validation),
        test: size_for(config.test),
    }
}
