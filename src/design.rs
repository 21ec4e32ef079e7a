//! The engineering design engine.
//!
//! A design is produced by running a fixed sequence of stages, each of which only depends on the
//! site inputs, the design parameters and the output of earlier stages:
//!
//! 1. [`water_balance`]: runoff available from the roof and the household requirement
//! 2. [`tank`]: storage capacity and standard tank dimensions
//! 3. [`collection`]: peak flow, gutters, downpipes and first-flush diverter
//! 4. [`filter`]: sand filter type and plan size
//! 5. [`recharge`]: groundwater recharge pit or shaft
//! 6. [`advice`]: warnings and recommendations
use crate::error::InvalidInputError;
use crate::parameters::DesignParameters;
use crate::project::ProjectInput;
use crate::units::{Litres, LitresPerSecond, Metres, Millimetres, SquareMetres};
use log::warn;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

pub mod advice;
pub mod collection;
pub mod filter;
pub mod recharge;
pub mod tank;
pub mod water_balance;

/// Type of sand filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
pub enum FilterType {
    /// Slow sand filter, for low peak flows
    #[serde(rename = "Slow Sand")]
    #[strum(serialize = "Slow Sand")]
    SlowSand,
    /// Rapid sand filter, for high peak flows
    #[serde(rename = "Rapid Sand")]
    #[strum(serialize = "Rapid Sand")]
    RapidSand,
}

/// Type of groundwater recharge structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
pub enum RechargeStructure {
    /// A pit for a shallow water table
    #[serde(rename = "Recharge Pit (Shallow)")]
    #[strum(serialize = "Recharge Pit (Shallow)")]
    ShallowPit,
    /// A pit
    #[serde(rename = "Recharge Pit")]
    #[strum(serialize = "Recharge Pit")]
    Pit,
    /// A narrow shaft reaching a deep water table
    #[serde(rename = "Recharge Shaft")]
    #[strum(serialize = "Recharge Shaft")]
    Shaft,
}

impl RechargeStructure {
    /// Whether this structure is a (shallow or ordinary) pit
    pub fn is_pit(self) -> bool {
        matches!(self, Self::ShallowPit | Self::Pit)
    }
}

/// A complete design for a rooftop rainwater harvesting system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignResult {
    /// Plan area of the roof catchment
    pub catchment_area: SquareMetres,
    /// Runoff collected from the roof in an average year
    pub water_available: Litres,
    /// Water needed to cover the scarcity period
    pub water_required: Litres,
    /// Whether the roof yields enough water to cover the scarcity period
    pub is_feasible: bool,
    /// Storage tank capacity
    pub tank_capacity: Litres,
    /// Storage tank diameter
    pub tank_diameter: Metres,
    /// Storage tank height
    pub tank_height: Metres,
    /// Runoff rate at the design rainfall intensity
    pub peak_flow: LitresPerSecond,
    /// Gutter diameter
    pub gutter_diameter: Millimetres,
    /// Downpipe diameter
    pub downpipe_diameter: Millimetres,
    /// Volume diverted by the first-flush device
    pub first_flush_volume: Litres,
    /// Length of pipe holding the first-flush volume
    pub first_flush_pipe_length: Metres,
    /// Type of sand filter
    pub filter_type: FilterType,
    /// Filter bed area
    pub filter_area: SquareMetres,
    /// Filter bed length
    pub filter_length: Metres,
    /// Filter bed width
    pub filter_width: Metres,
    /// Type of recharge structure
    pub recharge_structure: RechargeStructure,
    /// Depth of the recharge structure
    pub recharge_depth: Metres,
    /// Diameter of the recharge structure
    pub recharge_diameter: Metres,
    /// Problems with the site or design
    pub warnings: Vec<String>,
    /// Suggestions for the user
    pub recommendations: Vec<String>,
}

/// Design a rainwater harvesting system for the given site.
///
/// # Arguments
///
/// * `input` - Site and building parameters
/// * `params` - Engineering tables
///
/// # Returns
///
/// The design, or an error if any of the inputs are out of range.
pub fn compute_design(
    input: &ProjectInput,
    params: &DesignParameters,
) -> Result<DesignResult, InvalidInputError> {
    input.validate()?;

    let balance = water_balance::calculate_water_balance(input, params);
    let tank = tank::size_tank(&balance, params);
    let collection = collection::design_collection(input, &balance, params);
    let filter = filter::design_filter(&collection, params);
    let recharge = recharge::design_recharge(input, params);
    let warnings = advice::generate_warnings(input, &balance, &collection, &params.advice);
    let recommendations =
        advice::generate_recommendations(input, &balance, &tank, &params.advice);

    for warning in &warnings {
        warn!("{warning}");
    }

    Ok(DesignResult {
        catchment_area: input.roof_area,
        water_available: balance.water_available,
        water_required: balance.water_required,
        is_feasible: balance.is_feasible,
        tank_capacity: tank.capacity,
        tank_diameter: tank.diameter,
        tank_height: tank.height,
        peak_flow: collection.peak_flow,
        gutter_diameter: collection.gutter_diameter,
        downpipe_diameter: collection.downpipe_diameter,
        first_flush_volume: collection.first_flush_volume,
        first_flush_pipe_length: collection.first_flush_pipe_length,
        filter_type: filter.filter_type,
        filter_area: filter.area,
        filter_length: filter.length,
        filter_width: filter.width,
        recharge_structure: recharge.structure,
        recharge_depth: recharge.depth,
        recharge_diameter: recharge.diameter,
        warnings,
        recommendations,
    })
}
