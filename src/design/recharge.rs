//! Groundwater recharge structure selection and sizing.
use super::RechargeStructure;
use crate::parameters::DesignParameters;
use crate::parameters::design::RechargeParameters;
use crate::project::{AquiferType, ProjectInput};
use crate::units::Metres;
use log::debug;

/// Type and dimensions of the recharge structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RechargeDesign {
    /// Pit or shaft
    pub structure: RechargeStructure,
    /// Depth below ground level
    pub depth: Metres,
    /// Diameter of the structure
    pub diameter: Metres,
}

/// Choose the type of recharge structure from the pre-monsoon water table depth.
///
/// When the depth is unknown, the aquifer type decides: hard rock needs a shaft to reach water
/// bearing fractures. Once the depth is known it alone decides.
fn select_structure(
    aquifer_type: AquiferType,
    depth_water: Option<Metres>,
    params: &RechargeParameters,
) -> RechargeStructure {
    match depth_water {
        None if aquifer_type == AquiferType::Consolidated => RechargeStructure::Shaft,
        None => RechargeStructure::Pit,
        Some(depth) if depth < params.shallow_pit_max_depth => RechargeStructure::ShallowPit,
        Some(depth) if depth < params.shaft_min_depth => RechargeStructure::Pit,
        Some(_) => RechargeStructure::Shaft,
    }
}

/// Choose and size a recharge structure for the site
pub fn design_recharge(input: &ProjectInput, params: &DesignParameters) -> RechargeDesign {
    let params = &params.recharge;
    let depth_water = input.depth_water_premonsoon;
    let structure = select_structure(input.aquifer_type, depth_water, params);

    let (depth, diameter) = if structure.is_pit() {
        // Stay above the water table, leaving an unsaturated zone for percolation
        let depth = depth_water.map_or(params.pit_default_depth, |d| d - params.pit_clearance);
        (
            depth.min(params.pit_max_depth).max(Metres(0.0)),
            params.pit_diameter,
        )
    } else {
        let depth = depth_water.map_or(params.shaft_default_depth, |d| d + params.shaft_extension);
        (depth.min(params.shaft_max_depth), params.shaft_diameter)
    };

    debug!("Recharge: {structure}, {depth} m deep, {diameter} m diameter");
    RechargeDesign {
        structure,
        depth,
        diameter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{design_parameters, project_input};
    use rstest::rstest;

    #[rstest]
    #[case(AquiferType::Consolidated, None, RechargeStructure::Shaft, 10.0, 0.75)]
    #[case(AquiferType::SemiConsolidated, None, RechargeStructure::Pit, 3.0, 1.5)]
    #[case(AquiferType::Unconsolidated, None, RechargeStructure::Pit, 3.0, 1.5)]
    #[case(AquiferType::Unconsolidated, Some(0.5), RechargeStructure::ShallowPit, 0.0, 1.5)]
    #[case(AquiferType::Unconsolidated, Some(2.5), RechargeStructure::ShallowPit, 1.5, 1.5)]
    #[case(AquiferType::Unconsolidated, Some(5.0), RechargeStructure::Pit, 4.0, 1.5)]
    #[case(AquiferType::Consolidated, Some(8.0), RechargeStructure::Pit, 5.0, 1.5)]
    #[case(AquiferType::Unconsolidated, Some(14.9), RechargeStructure::Pit, 5.0, 1.5)]
    #[case(AquiferType::Unconsolidated, Some(15.0), RechargeStructure::Shaft, 15.0, 0.75)]
    #[case(AquiferType::Consolidated, Some(12.5), RechargeStructure::Pit, 5.0, 1.5)]
    #[case(AquiferType::Consolidated, Some(30.0), RechargeStructure::Shaft, 15.0, 0.75)]
    fn test_design_recharge(
        mut project_input: ProjectInput,
        design_parameters: DesignParameters,
        #[case] aquifer_type: AquiferType,
        #[case] depth_water: Option<f64>,
        #[case] structure: RechargeStructure,
        #[case] depth: f64,
        #[case] diameter: f64,
    ) {
        project_input.aquifer_type = aquifer_type;
        project_input.depth_water_premonsoon = depth_water.map(Metres);
        let recharge = design_recharge(&project_input, &design_parameters);
        assert_eq!(recharge.structure, structure);
        assert_eq!(recharge.depth, Metres(depth));
        assert_eq!(recharge.diameter, Metres(diameter));
    }

    #[rstest]
    fn test_shaft_depth_below_cap(
        mut project_input: ProjectInput,
        mut design_parameters: DesignParameters,
    ) {
        // Lower the shaft threshold so that a shaft can be shallower than its cap
        design_parameters.recharge.shallow_pit_max_depth = Metres(4.0);
        design_parameters.recharge.shaft_min_depth = Metres(6.0);
        project_input.depth_water_premonsoon = Some(Metres(7.0));
        let recharge = design_recharge(&project_input, &design_parameters);
        assert_eq!(recharge.structure, RechargeStructure::Shaft);
        assert_eq!(recharge.depth, Metres(9.0));
    }
}
