//! Errors raised when caller-supplied values make an assessment meaningless.
use crate::project::MAX_HORIZON_YEARS;
use thiserror::Error;

/// A caller-supplied value is outside the range for which the calculations are defined
#[derive(Debug, Error, PartialEq, Clone)]
pub enum InvalidInputError {
    /// Roof area is not positive
    #[error("Roof area must be a finite number greater than zero (got {0} m²)")]
    RoofArea(f64),

    /// Household has no members
    #[error("Household size must be at least one person")]
    HouseholdSize,

    /// Scarcity period is longer than a year
    #[error("Water scarcity period must be between 0 and 365 days (got {0})")]
    WaterScarcityDays(u32),

    /// Annual rainfall is not positive
    #[error("Annual rainfall must be a finite number greater than zero (got {0} mm)")]
    AnnualRainfall(f64),

    /// Rainfall intensity is not positive
    #[error("Rainfall intensity must be a finite number greater than zero (got {0} mm/hr)")]
    RainfallIntensity(f64),

    /// Water table depth is not positive
    #[error("Depth to water table ({season}) must be a finite number greater than zero (got {value} m)")]
    WaterTableDepth {
        /// Which of the seasonal readings is invalid
        season: &'static str,
        /// The invalid depth (m)
        value: f64,
    },

    /// Infiltration rate is negative
    #[error("Soil infiltration rate cannot be negative (got {0})")]
    InfiltrationRate(f64),

    /// Available space is negative
    #[error("Available space cannot be negative (got {0} m²)")]
    AvailableSpace(f64),

    /// A gutter or downpipe length is negative
    #[error("{name} cannot be negative (got {value} m)")]
    PipeLength {
        /// Which pipe run is invalid
        name: &'static str,
        /// The invalid length (m)
        value: f64,
    },

    /// Water savings volume is negative
    #[error("Water savings volume cannot be negative (got {0} L)")]
    WaterSavingsVolume(f64),

    /// Appraisal period is zero or unreasonably long
    #[error(
        "Appraisal period must be between 1 and {max} years (got {0})",
        max = MAX_HORIZON_YEARS
    )]
    HorizonYears(u32),

    /// Discount rate is negative
    #[error("Discount rate must be a finite number of at least zero (got {0})")]
    DiscountRate(f64),

    /// Subsidy fraction is outside [0, 1)
    #[error("Subsidy fraction must be at least zero and less than one (got {0})")]
    SubsidyFraction(f64),
}

/// Check that a value is finite and strictly positive
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Check that a value is finite and not negative
pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
