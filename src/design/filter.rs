//! Sand filter selection and sizing.
use super::FilterType;
use super::collection::CollectionDesign;
use crate::parameters::DesignParameters;
use crate::units::{Metres, SquareMetres};
use log::debug;

/// Type and plan dimensions of the sand filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDesign {
    /// Slow or rapid sand filter
    pub filter_type: FilterType,
    /// Bed area needed to pass the peak flow
    pub area: SquareMetres,
    /// Length of the square filter bed
    pub length: Metres,
    /// Width of the square filter bed
    pub width: Metres,
}

/// Round a length up to a whole number of increments
fn round_up(length: f64, increment: Metres) -> Metres {
    let steps_per_metre = 1.0 / increment.value();
    Metres((length * steps_per_metre).ceil() / steps_per_metre)
}

/// Choose and size a filter able to pass the peak flow
pub fn design_filter(collection: &CollectionDesign, params: &DesignParameters) -> FilterDesign {
    let filter_params = &params.filter;
    let (filter_type, rate) = if collection.peak_flow > filter_params.rapid_sand_threshold {
        (FilterType::RapidSand, filter_params.rapid_sand_rate)
    } else {
        (FilterType::SlowSand, filter_params.slow_sand_rate)
    };

    let area = collection.peak_flow.to_litres_per_hour() / rate;
    let side = round_up(area.value().sqrt(), filter_params.plan_increment);

    debug!("Filter: {filter_type}, {area} m²");
    FilterDesign {
        filter_type,
        area,
        length: side,
        width: side,
    }
}
