//! Warnings and recommendations about a design.
use super::collection::CollectionDesign;
use super::tank::TankDesign;
use super::water_balance::WaterBalance;
use crate::parameters::design::AdviceThresholds;
use crate::project::{AquiferType, ProjectInput};

/// Problems with the site or design which the user should know about
pub fn generate_warnings(
    input: &ProjectInput,
    balance: &WaterBalance,
    collection: &CollectionDesign,
    thresholds: &AdviceThresholds,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.annual_rainfall < thresholds.low_rainfall {
        warnings.push(format!(
            "Low rainfall area (<{}mm) - Storage system recommended over direct recharge",
            thresholds.low_rainfall
        ));
    }

    if let Some(depth) = input.depth_water_premonsoon
        && depth < thresholds.shallow_water_table
    {
        warnings.push(format!(
            "Shallow water table (<{}m) - Risk of water logging, avoid recharge pits",
            thresholds.shallow_water_table
        ));
    }

    if input.roof_area < thresholds.small_roof_area {
        warnings.push("Small roof area - System may not be economically viable".into());
    }

    if !balance.is_feasible {
        warnings
            .push("Water available from roof is insufficient for full scarcity period".into());
    }

    if collection.peak_flow > thresholds.high_peak_flow {
        warnings.push(
            "High peak flow - Consider multiple collection points or larger piping system".into(),
        );
    }

    if input.aquifer_type == AquiferType::Consolidated {
        warnings
            .push("Consolidated rock aquifer - Recharge shafts required instead of pits".into());
    }

    warnings
}

/// Suggestions for getting the most from the system
pub fn generate_recommendations(
    input: &ProjectInput,
    balance: &WaterBalance,
    tank: &TankDesign,
    thresholds: &AdviceThresholds,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if input.annual_rainfall > thresholds.high_rainfall {
        recommendations.push(
            "High rainfall area - Direct recharge to aquifer recommended in addition to storage"
                .into(),
        );
    }

    if balance.is_feasible
        && balance.water_available > balance.water_required * thresholds.surplus_factor
    {
        recommendations.push(
            "Surplus water available - Consider artificial recharge structures for groundwater \
             replenishment"
                .into(),
        );
    }

    if input.aquifer_type == AquiferType::Unconsolidated {
        recommendations.push(
            "Unconsolidated aquifer - Excellent for artificial recharge through pits or shafts"
                .into(),
        );
    }

    if let Some(rate) = input.infiltration_rate
        && rate > thresholds.high_infiltration_rate
    {
        recommendations.push(
            "High infiltration rate - Suitable for percolation pits and direct recharge".into(),
        );
    }

    recommendations
        .push("Implement pre-monsoon roof and gutter cleaning for optimal water quality".into());
    recommendations.push("Install mesh screens at gutter inlets to prevent debris entry".into());

    if tank.capacity > thresholds.large_tank {
        recommendations.push(
            "Large storage capacity - Consider dividing into multiple tanks for better \
             maintenance"
                .into(),
        );
    }

    recommendations
}
