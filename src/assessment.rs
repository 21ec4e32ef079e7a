//! Full feasibility assessment of a project: design, costing and economics.
use crate::costs::{CostBreakdown, calculate_cost_breakdown};
use crate::design::{DesignResult, compute_design};
use crate::economics::{
    AnnualBenefits, EconomicAnalysis, ViabilityAssessment, assess_viability,
    calculate_annual_benefits, perform_economic_analysis,
};
use crate::parameters::{CostRates, Parameters};
use crate::project::{AppraisalOptions, BenefitInput, CostInput, Project};
use anyhow::{Context, Result};
use log::info;

/// The capital cost of a design and the economic analysis based on it
#[derive(Debug, Clone, PartialEq)]
pub struct CostAndEconomics {
    /// The valued benefits
    pub benefits: AnnualBenefits,
    /// Capital cost of each part of the system
    pub cost_breakdown: CostBreakdown,
    /// Cost-benefit analysis
    pub economic_analysis: EconomicAnalysis,
}

/// Cost a design and analyse its economics.
///
/// # Arguments
///
/// * `design` - The designed system
/// * `cost_input` - Site quantities needed for costing
/// * `benefit_input` - Quantities from which benefits are valued
/// * `options` - Appraisal period, discount rate and subsidy
/// * `rates` - Unit rates
pub fn compute_cost_and_economics(
    design: &DesignResult,
    cost_input: &CostInput,
    benefit_input: &BenefitInput,
    options: &AppraisalOptions,
    rates: &CostRates,
) -> Result<CostAndEconomics> {
    cost_input.validate().context("Invalid cost input")?;
    benefit_input.validate().context("Invalid benefit input")?;
    options.validate().context("Invalid appraisal options")?;

    let cost_breakdown = calculate_cost_breakdown(design, cost_input, rates);
    let benefits = calculate_annual_benefits(benefit_input, &rates.benefits);
    let economic_analysis = perform_economic_analysis(&cost_breakdown, &benefits, options, rates);

    Ok(CostAndEconomics {
        benefits,
        cost_breakdown,
        economic_analysis,
    })
}

/// Everything known about a project once it has been assessed
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// The designed system
    pub design: DesignResult,
    /// The inputs from which benefits were valued
    pub benefit_input: BenefitInput,
    /// The valued benefits
    pub benefits: AnnualBenefits,
    /// Capital cost of each part of the system
    pub cost_breakdown: CostBreakdown,
    /// Cost-benefit analysis
    pub economic_analysis: EconomicAnalysis,
    /// Viability without subsidy
    pub viability: ViabilityAssessment,
    /// Viability with the subsidy applied
    pub viability_with_subsidy: ViabilityAssessment,
}

/// Derive benefit inputs from the design when the project does not supply them.
///
/// The tank either stores the full requirement or, if the roof cannot supply it, everything the
/// roof yields.
fn derive_benefit_input(project: &Project, design: &DesignResult) -> BenefitInput {
    if let Some(benefits) = &project.benefits {
        return benefits.clone();
    }

    let water_savings_volume = if design.is_feasible {
        design.water_required
    } else {
        design.water_available
    };

    BenefitInput {
        water_savings_volume,
        depth_reduction: project.site.depth_reduction(),
    }
}

/// Assess the feasibility of a project.
///
/// The system is designed, costed and appraised, then classified by viability both with and
/// without the subsidy.
pub fn assess(project: &Project, parameters: &Parameters) -> Result<Assessment> {
    let design = compute_design(&project.site, &parameters.design).context("Invalid site input")?;
    let benefit_input = derive_benefit_input(project, &design);

    let CostAndEconomics {
        benefits,
        cost_breakdown,
        economic_analysis,
    } = compute_cost_and_economics(
        &design,
        &project.costs,
        &benefit_input,
        &project.appraisal,
        &parameters.costs,
    )?;

    let viability = assess_viability(economic_analysis.bc_ratio, economic_analysis.payback_period);
    let viability_with_subsidy = assess_viability(
        economic_analysis.bc_ratio_with_subsidy,
        economic_analysis.payback_period_with_subsidy,
    );
    info!(
        "Assessment complete: capital cost {}, {}",
        cost_breakdown.total_cost, viability.category
    );

    Ok(Assessment {
        design,
        benefit_input,
        benefits,
        cost_breakdown,
        economic_analysis,
        viability,
        viability_with_subsidy,
    })
}
