//! Gutters, downpipes and the first-flush diverter.
use super::water_balance::WaterBalance;
use crate::parameters::DesignParameters;
use crate::project::ProjectInput;
use crate::units::{Litres, LitresPerSecond, Metres, Millimetres, SquareMetres};
use log::{debug, warn};
use std::f64::consts::PI;

/// Sizes of the components which convey runoff from the roof to storage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionDesign {
    /// Runoff rate from the roof at the design rainfall intensity
    pub peak_flow: LitresPerSecond,
    /// Diameter of the smallest standard gutter which carries the peak flow
    pub gutter_diameter: Millimetres,
    /// Diameter of the downpipe
    pub downpipe_diameter: Millimetres,
    /// Volume of initial runoff diverted away from storage
    pub first_flush_volume: Litres,
    /// Length of downpipe-sized pipe needed to hold the first-flush volume
    pub first_flush_pipe_length: Metres,
}

/// Cross-sectional area of a circular pipe
fn pipe_cross_section(diameter: Millimetres) -> SquareMetres {
    let radius = diameter.to_metres().value() / 2.0;
    SquareMetres(PI * radius * radius)
}

/// Size the collection system for the design rainfall intensity
pub fn design_collection(
    input: &ProjectInput,
    balance: &WaterBalance,
    params: &DesignParameters,
) -> CollectionDesign {
    let runoff = balance.runoff_coefficient * (input.roof_area * input.rainfall_intensity);
    let peak_flow = runoff.to_litres_per_second();

    let (gutter, fits) = params.gutter_tiers.select(peak_flow);
    if !fits {
        warn!(
            "Peak flow of {peak_flow} L/s exceeds the capacity of the largest gutter ({} L/s)",
            gutter.capacity
        );
    }
    let (downpipe, _) = params.downpipe_tiers.select(peak_flow);

    let first_flush_volume = input.roof_area * params.first_flush_depth;
    let first_flush_pipe_length =
        first_flush_volume.to_cubic_metres() / pipe_cross_section(downpipe.diameter);

    let collection = CollectionDesign {
        peak_flow,
        gutter_diameter: gutter.diameter,
        downpipe_diameter: downpipe.diameter,
        first_flush_volume,
        first_flush_pipe_length,
    };
    debug!(
        "Collection: peak flow {} L/s, {} mm gutter, {} mm downpipe",
        collection.peak_flow, collection.gutter_diameter, collection.downpipe_diameter
    );

    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::water_balance::calculate_water_balance;
    use crate::fixture::{design_parameters, project_input};
    use crate::units::MillimetresPerHour;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn collection_for(
        mut input: ProjectInput,
        params: &DesignParameters,
        roof_area: f64,
        intensity: f64,
    ) -> CollectionDesign {
        input.roof_area = SquareMetres(roof_area);
        input.rainfall_intensity = MillimetresPerHour(intensity);
        let balance = calculate_water_balance(&input, params);
        design_collection(&input, &balance, params)
    }

    #[rstest]
    fn test_peak_flow(project_input: ProjectInput, design_parameters: DesignParameters) {
        // 100 m² × 77.142857 mm/hr × 0.7 = 5400 L/hr
        let collection = collection_for(project_input, &design_parameters, 100.0, 540.0 / 7.0);
        assert_approx_eq!(LitresPerSecond, collection.peak_flow, LitresPerSecond(1.5));
        assert_eq!(collection.gutter_diameter, Millimetres(150.0));
        assert_eq!(collection.downpipe_diameter, Millimetres(75.0));
    }

    #[rstest]
    #[case(0.5, 100.0, 50.0)]
    #[case(0.99, 100.0, 50.0)]
    #[case(1.1, 150.0, 75.0)]
    #[case(2.9, 150.0, 75.0)]
    #[case(3.1, 200.0, 100.0)]
    #[case(6.5, 250.0, 100.0)]
    #[case(12.0, 300.0, 100.0)]
    #[case(20.0, 300.0, 100.0)] // Beyond the largest gutter
    fn test_pipe_sizes(
        project_input: ProjectInput,
        design_parameters: DesignParameters,
        #[case] peak_flow: f64,
        #[case] gutter: f64,
        #[case] downpipe: f64,
    ) {
        // Choose an intensity giving the required peak flow on a 360 m² concrete roof
        let intensity = peak_flow * 3600.0 / (360.0 * 0.7);
        let collection = collection_for(project_input, &design_parameters, 360.0, intensity);
        assert_eq!(collection.gutter_diameter, Millimetres(gutter));
        assert_eq!(collection.downpipe_diameter, Millimetres(downpipe));
    }

    #[rstest]
    fn test_first_flush(project_input: ProjectInput, design_parameters: DesignParameters) {
        let collection = collection_for(project_input, &design_parameters, 100.0, 50.0);
        assert_eq!(collection.first_flush_volume, Litres(50.0));

        // 0.05 m³ in a 50 mm pipe
        let expected = 0.05 / (PI * 0.025 * 0.025);
        assert_approx_eq!(
            Metres,
            collection.first_flush_pipe_length,
            Metres(expected)
        );
    }

    #[rstest]
    fn test_gutter_monotonic(project_input: ProjectInput, design_parameters: DesignParameters) {
        let gutters: Vec<_> = (1..40)
            .map(|i| {
                let collection =
                    collection_for(project_input.clone(), &design_parameters, 100.0, i as f64 * 10.0);
                collection.gutter_diameter
            })
            .collect();
        assert!(gutters.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
