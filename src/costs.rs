//! Capital cost of building a designed system.
use crate::design::{DesignResult, FilterType, RechargeStructure};
use crate::parameters::CostRates;
use crate::parameters::costs::{CivilRates, FilterRates, PipingRates, RechargeRates};
use crate::project::CostInput;
use crate::units::{CubicMetres, Litres, Metres, Money, SquareMetres};
use log::debug;
use serde::Serialize;
use std::f64::consts::PI;

pub use crate::parameters::costs::TankMaterial;

/// Capital cost of each part of the system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    /// Material chosen for the tank
    pub tank_material: TankMaterial,
    /// Storage tank
    pub tank_cost: Money,
    /// Gutters, downpipes and first-flush device
    pub piping_cost: Money,
    /// Sand filter and media
    pub filter_cost: Money,
    /// Recharge pit or shaft
    pub recharge_structure_cost: Money,
    /// Excavation, foundation and plastering for the tank
    pub civil_works_cost: Money,
    /// Labour
    pub labour_cost: Money,
    /// Sum of all of the above
    pub total_cost: Money,
}

impl CostBreakdown {
    /// Cost of each component, labelled, in a fixed order
    pub fn components(&self) -> [(&'static str, Money); 7] {
        [
            ("Tank", self.tank_cost),
            ("Piping", self.piping_cost),
            ("Filter", self.filter_cost),
            ("Recharge structure", self.recharge_structure_cost),
            ("Civil works", self.civil_works_cost),
            ("Labour", self.labour_cost),
            ("Total", self.total_cost),
        ]
    }
}

/// Area of a circle of the given diameter
fn circle_area(diameter: Metres) -> SquareMetres {
    let radius = diameter.value() / 2.0;
    SquareMetres(PI * radius * radius)
}

/// Curved surface area of a cylinder
fn cylinder_wall_area(diameter: Metres, height: Metres) -> SquareMetres {
    SquareMetres(PI * diameter.value() * height.value())
}

/// Cost of gutters, downpipes and the first-flush device
fn piping_cost(catchment_area: SquareMetres, input: &CostInput, rates: &PipingRates) -> Money {
    let gutter_length = input.gutter_length.unwrap_or_else(|| {
        Metres(catchment_area.value() * rates.default_gutter_length_per_roof_area)
    });
    let downpipe_length = input
        .downpipe_length
        .unwrap_or(rates.default_downpipe_length);

    gutter_length * rates.gutter + downpipe_length * rates.downpipe + rates.first_flush_device
}

/// Cost of the filter unit plus its media
fn filter_cost(filter_type: FilterType, filter_area: SquareMetres, rates: &FilterRates) -> Money {
    let base = match filter_type {
        FilterType::SlowSand => rates.slow_sand,
        FilterType::RapidSand => rates.rapid_sand,
    };
    let media_volume = filter_area * rates.media_depth;

    base + media_volume * rates.media
}

/// Cost of digging, filling and lining a pit or drilling and casing a shaft
fn recharge_cost(
    structure: RechargeStructure,
    depth: Metres,
    diameter: Metres,
    rates: &RechargeRates,
) -> Money {
    let wall_area = cylinder_wall_area(diameter, depth);

    if structure.is_pit() {
        let volume = circle_area(diameter) * depth;
        let lining = wall_area * rates.pit_lining_thickness;
        volume * rates.excavation + volume * rates.pit_media + lining * rates.masonry
    } else {
        let casing = wall_area * rates.shaft_casing_thickness;
        depth * rates.shaft_drilling + casing * rates.casing
    }
}

/// Cost of the works around a cylindrical tank of the given capacity and height.
///
/// The diameter used is that of a cylinder which holds exactly the capacity, rather than the
/// standard tank diameter.
fn civil_works_cost(capacity: Litres, height: Metres, rates: &CivilRates) -> Money {
    let volume = capacity.to_cubic_metres();
    let diameter = Metres(2.0 * (volume.value() / (PI * height.value())).sqrt());
    let footprint = circle_area(diameter);

    let excavation: CubicMetres = footprint * height;
    let foundation: CubicMetres = footprint * rates.foundation_thickness;
    let plastered = cylinder_wall_area(diameter, height) + footprint;

    excavation * rates.excavation + foundation * rates.concrete + plastered * rates.plastering
}

/// Calculate the capital cost of each part of a design.
///
/// # Arguments
///
/// * `design` - The system to cost
/// * `input` - Site quantities not covered by the design (e.g. gutter length)
/// * `rates` - Unit rates
pub fn calculate_cost_breakdown(
    design: &DesignResult,
    input: &CostInput,
    rates: &CostRates,
) -> CostBreakdown {
    let (tank_tier, _) = rates.tank_materials.select(design.tank_capacity);
    let tank_cost = design.tank_capacity * tank_tier.rate;
    let piping_cost = piping_cost(design.catchment_area, input, &rates.piping);
    let filter_cost = filter_cost(design.filter_type, design.filter_area, &rates.filter);
    let recharge_structure_cost = recharge_cost(
        design.recharge_structure,
        design.recharge_depth,
        design.recharge_diameter,
        &rates.recharge,
    );
    let civil_works_cost =
        civil_works_cost(design.tank_capacity, design.tank_height, &rates.civil);

    let material_cost =
        tank_cost + piping_cost + filter_cost + recharge_structure_cost + civil_works_cost;
    let labour_cost = material_cost * rates.labour_fraction;
    let total_cost = material_cost + labour_cost;
    debug!("Capital cost: {total_cost} ({material_cost} materials, {labour_cost} labour)");

    CostBreakdown {
        tank_material: tank_tier.material,
        tank_cost,
        piping_cost,
        filter_cost,
        recharge_structure_cost,
        civil_works_cost,
        labour_cost,
        total_cost,
    }
}
