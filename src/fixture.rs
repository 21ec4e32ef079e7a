//! Fixtures for tests

use crate::costs::{CostBreakdown, TankMaterial};
use crate::design::{DesignResult, FilterType, RechargeStructure};
use crate::parameters::{CostRates, DesignParameters};
use crate::project::{AppraisalOptions, AquiferType, CostInput, Project, ProjectInput, RoofMaterial};
use crate::units::{
    Litres, LitresPerSecond, Metres, Millimetres, MillimetresPerHour, Money, SquareMetres,
};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A household of four with a 100 m² concrete roof and 1000 mm of rain a year
#[fixture]
pub fn project_input() -> ProjectInput {
    ProjectInput {
        roof_area: SquareMetres(100.0),
        roof_material: RoofMaterial::Concrete,
        household_size: 4,
        water_scarcity_days: 90,
        annual_rainfall: Millimetres(1000.0),
        rainfall_intensity: MillimetresPerHour(50.0),
        aquifer_type: AquiferType::Unconsolidated,
        depth_water_premonsoon: None,
        depth_water_postmonsoon: None,
        soil_type: None,
        infiltration_rate: None,
        available_space: None,
    }
}

#[fixture]
pub fn project(project_input: ProjectInput) -> Project {
    Project {
        name: Some("Test house".into()),
        location: None,
        site: project_input,
        costs: CostInput::default(),
        benefits: None,
        appraisal: AppraisalOptions::default(),
    }
}

#[fixture]
pub fn design_parameters() -> DesignParameters {
    DesignParameters::default()
}

#[fixture]
pub fn cost_rates() -> CostRates {
    CostRates::default()
}

/// A design with round numbers, similar to that for [`project_input`] but with a 1.5 L/s peak flow
#[fixture]
pub fn design_result() -> DesignResult {
    DesignResult {
        catchment_area: SquareMetres(100.0),
        water_available: Litres(70_000.0),
        water_required: Litres(2160.0),
        is_feasible: true,
        tank_capacity: Litres(3000.0),
        tank_diameter: Metres(1.71),
        tank_height: Metres(1.6),
        peak_flow: LitresPerSecond(1.5),
        gutter_diameter: Millimetres(150.0),
        downpipe_diameter: Millimetres(75.0),
        first_flush_volume: Litres(50.0),
        first_flush_pipe_length: Metres(11.317),
        filter_type: FilterType::SlowSand,
        filter_area: SquareMetres(36.0),
        filter_length: Metres(6.0),
        filter_width: Metres(6.0),
        recharge_structure: RechargeStructure::Pit,
        recharge_depth: Metres(3.0),
        recharge_diameter: Metres(1.5),
        warnings: Vec::new(),
        recommendations: Vec::new(),
    }
}

/// A cost breakdown totalling 100 000
#[fixture]
pub fn cost_breakdown() -> CostBreakdown {
    CostBreakdown {
        tank_material: TankMaterial::FerroCement,
        tank_cost: Money(39_000.0),
        piping_cost: Money(13_650.0),
        filter_cost: Money(17_000.0),
        recharge_structure_cost: Money(9_000.0),
        civil_works_cost: Money(10_635.714_285_714_286),
        labour_cost: Money(10_714.285_714_285_714),
        total_cost: Money(100_000.0),
    }
}
