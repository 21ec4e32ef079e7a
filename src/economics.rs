//! Annual benefits, cost-benefit analysis and economic viability of a system.
//!
//! The analysis compares the annualised cost of the capital invested (interest foregone,
//! maintenance and repair, depreciation and other costs, as fractions of the capital cost) with
//! the value of the water and energy saved each year. A discounted cash-flow appraisal over the
//! life of the system is reported alongside.
use crate::costs::CostBreakdown;
use crate::finance::{
    DiscountedCashFlow, discounted_cash_flows, net_present_value, simple_payback,
};
use crate::parameters::CostRates;
use crate::parameters::costs::{AnnualCostFractions, BenefitRates};
use crate::project::{AppraisalOptions, BenefitInput};
use crate::units::{Dimensionless, Metres, Money, MoneyPerYear, Years};
use log::debug;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

/// The value of the savings made each year by harvesting rainwater
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualBenefits {
    /// Water which no longer has to be bought from an alternative source
    pub water_savings: MoneyPerYear,
    /// Electricity saved by pumping from a shallower water table
    pub energy_savings: MoneyPerYear,
    /// Pump maintenance avoided thanks to the shallower water table
    pub pump_maintenance_savings: MoneyPerYear,
}

impl AnnualBenefits {
    /// The total value of the savings
    pub fn total(&self) -> MoneyPerYear {
        self.water_savings + self.energy_savings + self.pump_maintenance_savings
    }
}

/// Calculate the value of the savings made each year.
///
/// Energy and pump maintenance savings are only counted if recharge raises the water table.
pub fn calculate_annual_benefits(input: &BenefitInput, rates: &BenefitRates) -> AnnualBenefits {
    let volume = input.water_savings_volume.to_cubic_metres().value();
    let water_savings = MoneyPerYear(volume * rates.alternative_water.value());

    let water_table_rises = input
        .depth_reduction
        .is_some_and(|reduction| reduction > Metres(0.0));
    let (energy_savings, pump_maintenance_savings) = if water_table_rises {
        (
            MoneyPerYear(volume * rates.pumping_energy * rates.electricity_tariff),
            rates.pump_maintenance,
        )
    } else {
        (MoneyPerYear(0.0), MoneyPerYear(0.0))
    };

    AnnualBenefits {
        water_savings,
        energy_savings,
        pump_maintenance_savings,
    }
}

/// The capital cost expressed as a cost per year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualisedCapitalCost {
    /// Interest foregone on the capital
    pub interest_loss: MoneyPerYear,
    /// Maintenance and repair of the structures
    pub maintenance_repair: MoneyPerYear,
    /// Depreciation of the structures
    pub depreciation: MoneyPerYear,
    /// Other costs
    pub miscellaneous: MoneyPerYear,
}

impl AnnualisedCapitalCost {
    fn new(capital_cost: Money, fractions: &AnnualCostFractions) -> Self {
        let per_year = |fraction: Dimensionless| MoneyPerYear((capital_cost * fraction).value());

        Self {
            interest_loss: per_year(fractions.interest),
            maintenance_repair: per_year(fractions.maintenance_repair),
            depreciation: per_year(fractions.depreciation),
            miscellaneous: per_year(fractions.miscellaneous),
        }
    }

    /// The total annualised cost
    pub fn total(&self) -> MoneyPerYear {
        self.interest_loss + self.maintenance_repair + self.depreciation + self.miscellaneous
    }
}

/// The outcome of a cost-benefit analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicAnalysis {
    /// Total capital cost of the system
    pub capital_cost: Money,
    /// Recurring cost of cleaning, disinfection and filter replacement
    pub annual_maintenance_cost: MoneyPerYear,
    /// Value of water saved each year
    pub annual_water_savings: MoneyPerYear,
    /// Value of energy and pump maintenance saved each year
    pub annual_energy_savings: MoneyPerYear,
    /// Total value of the savings each year
    pub total_annual_benefits: MoneyPerYear,
    /// Breakdown of the annualised capital cost
    pub annualised_cost: AnnualisedCapitalCost,
    /// Total annualised capital cost
    pub annual_cost_of_expenditure: MoneyPerYear,
    /// Ratio of annual benefits to annualised capital cost
    pub bc_ratio: Dimensionless,
    /// Years for net benefits to repay the capital cost
    pub payback_period: Years,
    /// Benefit-cost ratio when part of the capital cost is subsidised
    pub bc_ratio_with_subsidy: Dimensionless,
    /// Payback period when part of the capital cost is subsidised
    pub payback_period_with_subsidy: Years,
    /// Net present value over the appraisal period
    pub net_present_value: Money,
    /// Discounted cash flow for each year of the appraisal period
    pub cash_flows: Vec<DiscountedCashFlow>,
}

/// Ratio of benefits to costs, treating any benefit at zero cost as infinitely good
fn benefit_cost_ratio(benefits: MoneyPerYear, costs: MoneyPerYear) -> Dimensionless {
    if costs > MoneyPerYear(0.0) {
        benefits / costs
    } else if benefits > MoneyPerYear(0.0) {
        Dimensionless(f64::INFINITY)
    } else {
        Dimensionless(0.0)
    }
}

/// Compare the annual benefits of a system with its costs.
///
/// # Arguments
///
/// * `cost_breakdown` - Capital cost of the system
/// * `benefits` - Annual benefits of the system
/// * `options` - Appraisal period, discount rate and subsidy
/// * `rates` - Maintenance rates and annualised cost fractions
pub fn perform_economic_analysis(
    cost_breakdown: &CostBreakdown,
    benefits: &AnnualBenefits,
    options: &AppraisalOptions,
    rates: &CostRates,
) -> EconomicAnalysis {
    let capital_cost = cost_breakdown.total_cost;
    let unsubsidised = Dimensionless(1.0) - options.subsidy_fraction;

    let annualised_cost = AnnualisedCapitalCost::new(capital_cost, &rates.annual_cost_fractions);
    let annual_cost_of_expenditure = annualised_cost.total();
    let annual_maintenance_cost = rates.maintenance.annual_cost();

    let total_annual_benefits = benefits.total();
    let net_benefit = total_annual_benefits - annual_maintenance_cost;

    let cash_flows = discounted_cash_flows(
        capital_cost,
        net_benefit,
        options.horizon_years,
        options.discount_rate,
    );
    let net_present_value = net_present_value(capital_cost, &cash_flows);

    let analysis = EconomicAnalysis {
        capital_cost,
        annual_maintenance_cost,
        annual_water_savings: benefits.water_savings,
        annual_energy_savings: benefits.energy_savings + benefits.pump_maintenance_savings,
        total_annual_benefits,
        annualised_cost,
        annual_cost_of_expenditure,
        bc_ratio: benefit_cost_ratio(total_annual_benefits, annual_cost_of_expenditure),
        payback_period: simple_payback(capital_cost, net_benefit),
        bc_ratio_with_subsidy: benefit_cost_ratio(
            total_annual_benefits,
            annual_cost_of_expenditure * unsubsidised,
        ),
        payback_period_with_subsidy: simple_payback(capital_cost * unsubsidised, net_benefit),
        net_present_value,
        cash_flows,
    };
    debug!(
        "Economics: B/C ratio {}, payback {} years, NPV {}",
        analysis.bc_ratio, analysis.payback_period, analysis.net_present_value
    );

    analysis
}

/// How worthwhile a system is economically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
pub enum ViabilityCategory {
    /// Strong returns
    #[serde(rename = "Highly Viable")]
    #[strum(serialize = "Highly Viable")]
    HighlyViable,
    /// Positive returns
    Viable,
    /// Returns only justify the system on social or environmental grounds
    #[serde(rename = "Marginally Viable")]
    #[strum(serialize = "Marginally Viable")]
    MarginallyViable,
    /// Returns too low to justify the system
    #[serde(rename = "Not Viable")]
    #[strum(serialize = "Not Viable")]
    NotViable,
}

/// A verdict on the economic viability of a system
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViabilityAssessment {
    /// Whether the system is worth building at all
    pub is_viable: bool,
    /// How worthwhile the system is
    pub category: ViabilityCategory,
    /// Advice to the user
    pub recommendation: &'static str,
}

/// Classify a system by its benefit-cost ratio and payback period.
///
/// Each category requires a minimum B/C ratio and a maximum payback period (both inclusive).
pub fn assess_viability(bc_ratio: Dimensionless, payback_period: Years) -> ViabilityAssessment {
    let bc_ratio = bc_ratio.value();
    let payback_period = payback_period.value();

    let (category, recommendation) = if bc_ratio >= 1.5 && payback_period <= 10.0 {
        (
            ViabilityCategory::HighlyViable,
            "Excellent investment with strong economic returns. Proceed with implementation.",
        )
    } else if bc_ratio >= 1.0 && payback_period <= 15.0 {
        (
            ViabilityCategory::Viable,
            "Good investment with positive returns. Recommended for implementation.",
        )
    } else if bc_ratio >= 0.75 && payback_period <= 20.0 {
        (
            ViabilityCategory::MarginallyViable,
            "Acceptable for social/environmental projects. Consider with subsidy support.",
        )
    } else {
        (
            ViabilityCategory::NotViable,
            "Economic returns are low. Consider alternative solutions or wait for better subsidy \
             schemes.",
        )
    };

    ViabilityAssessment {
        is_viable: category != ViabilityCategory::NotViable,
        category,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{cost_breakdown, cost_rates};
    use crate::units::Litres;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn benefit_input(volume: f64, depth_reduction: Option<f64>) -> BenefitInput {
        BenefitInput {
            water_savings_volume: Litres(volume),
            depth_reduction: depth_reduction.map(Metres),
        }
    }

    #[rstest]
    #[case(None, 0.0, 0.0)]
    #[case(Some(0.0), 0.0, 0.0)]
    #[case(Some(-1.0), 0.0, 0.0)]
    #[case(Some(2.5), 350.0, 2000.0)]
    fn test_annual_benefits(
        #[case] depth_reduction: Option<f64>,
        #[case] energy: f64,
        #[case] pump: f64,
    ) {
        let input = benefit_input(100_000.0, depth_reduction);
        let benefits = calculate_annual_benefits(&input, &BenefitRates::default());

        assert_approx_eq!(MoneyPerYear, benefits.water_savings, MoneyPerYear(2000.0));
        assert_approx_eq!(MoneyPerYear, benefits.energy_savings, MoneyPerYear(energy));
        assert_eq!(benefits.pump_maintenance_savings, MoneyPerYear(pump));
        assert_approx_eq!(
            MoneyPerYear,
            benefits.total(),
            MoneyPerYear(2000.0 + energy + pump)
        );
    }

    #[test]
    fn test_annualised_capital_cost() {
        let cost = AnnualisedCapitalCost::new(Money(100_000.0), &AnnualCostFractions::default());
        assert_approx_eq!(MoneyPerYear, cost.interest_loss, MoneyPerYear(10_000.0));
        assert_approx_eq!(MoneyPerYear, cost.maintenance_repair, MoneyPerYear(2500.0));
        assert_approx_eq!(MoneyPerYear, cost.depreciation, MoneyPerYear(5000.0));
        assert_approx_eq!(MoneyPerYear, cost.miscellaneous, MoneyPerYear(1000.0));
        assert_approx_eq!(
            MoneyPerYear,
            cost.total(),
            MoneyPerYear(18_500.0),
            epsilon = 1e-9
        );
    }

    fn benefits(total: f64) -> AnnualBenefits {
        AnnualBenefits {
            water_savings: MoneyPerYear(total),
            energy_savings: MoneyPerYear(0.0),
            pump_maintenance_savings: MoneyPerYear(0.0),
        }
    }

    #[rstest]
    fn test_economic_analysis(cost_breakdown: CostBreakdown, cost_rates: CostRates) {
        // Capital cost of 100 000 with benefits of 23 250 and maintenance of 3250 per year
        let options = AppraisalOptions::default();
        let analysis = perform_economic_analysis(
            &cost_breakdown,
            &benefits(23_250.0),
            &options,
            &cost_rates,
        );

        assert_eq!(analysis.capital_cost, Money(100_000.0));
        assert_eq!(analysis.annual_maintenance_cost, MoneyPerYear(3250.0));
        assert_approx_eq!(
            MoneyPerYear,
            analysis.annual_cost_of_expenditure,
            MoneyPerYear(18_500.0),
            epsilon = 1e-9
        );
        assert_approx_eq!(
            Dimensionless,
            analysis.bc_ratio,
            Dimensionless(23_250.0 / 18_500.0),
            epsilon = 1e-12
        );
        assert_approx_eq!(Years, analysis.payback_period, Years(5.0));
        assert_eq!(analysis.bc_ratio_with_subsidy, analysis.bc_ratio);
        assert_eq!(analysis.payback_period_with_subsidy, analysis.payback_period);
        assert_eq!(analysis.cash_flows.len(), 20);
        assert_eq!(
            analysis.net_present_value,
            analysis.cash_flows.last().unwrap().cumulative_npv
        );
    }

    #[rstest]
    fn test_economic_analysis_subsidy(cost_breakdown: CostBreakdown, cost_rates: CostRates) {
        let options = AppraisalOptions {
            subsidy_fraction: Dimensionless(0.5),
            ..AppraisalOptions::default()
        };
        let analysis = perform_economic_analysis(
            &cost_breakdown,
            &benefits(23_250.0),
            &options,
            &cost_rates,
        );

        assert_approx_eq!(
            Dimensionless,
            analysis.bc_ratio_with_subsidy,
            analysis.bc_ratio * Dimensionless(2.0),
            epsilon = 1e-12
        );
        assert_approx_eq!(Years, analysis.payback_period_with_subsidy, Years(2.5));
    }

    #[rstest]
    fn test_economic_analysis_zero_discount(cost_breakdown: CostBreakdown, cost_rates: CostRates) {
        let options = AppraisalOptions {
            horizon_years: 10,
            discount_rate: Dimensionless(0.0),
            subsidy_fraction: Dimensionless(0.0),
        };
        let analysis = perform_economic_analysis(
            &cost_breakdown,
            &benefits(23_250.0),
            &options,
            &cost_rates,
        );

        // -C + N × (B − M)
        assert_approx_eq!(Money, analysis.net_present_value, Money(100_000.0));
    }

    #[rstest]
    fn test_economic_analysis_never_pays_back(
        cost_breakdown: CostBreakdown,
        cost_rates: CostRates,
    ) {
        let analysis = perform_economic_analysis(
            &cost_breakdown,
            &benefits(3000.0),
            &AppraisalOptions::default(),
            &cost_rates,
        );

        assert_eq!(analysis.payback_period, Years(f64::INFINITY));
        assert_eq!(analysis.payback_period_with_subsidy, Years(f64::INFINITY));
        assert!(analysis.net_present_value < -analysis.capital_cost);
        assert_eq!(
            assess_viability(analysis.bc_ratio, analysis.payback_period).category,
            ViabilityCategory::NotViable
        );
    }

    #[rstest]
    #[case(2.0, 5.0, ViabilityCategory::HighlyViable)]
    #[case(1.5, 10.0, ViabilityCategory::HighlyViable)]
    #[case(1.5, 10.5, ViabilityCategory::Viable)]
    #[case(1.0, 15.0, ViabilityCategory::Viable)]
    #[case(0.99, 5.0, ViabilityCategory::MarginallyViable)]
    #[case(0.75, 20.0, ViabilityCategory::MarginallyViable)]
    #[case(0.74, 5.0, ViabilityCategory::NotViable)]
    #[case(3.0, 20.5, ViabilityCategory::NotViable)]
    #[case(3.0, f64::INFINITY, ViabilityCategory::NotViable)]
    fn test_assess_viability(
        #[case] bc_ratio: f64,
        #[case] payback_period: f64,
        #[case] expected: ViabilityCategory,
    ) {
        let assessment = assess_viability(Dimensionless(bc_ratio), Years(payback_period));
        assert_eq!(assessment.category, expected);
        assert_eq!(
            assessment.is_viable,
            expected != ViabilityCategory::NotViable
        );
    }

    #[test]
    fn test_viability_recommendation() {
        let assessment = assess_viability(Dimensionless(0.5), Years(30.0));
        assert_eq!(assessment.category.to_string(), "Not Viable");
        assert_eq!(
            assessment.recommendation,
            "Economic returns are low. Consider alternative solutions or wait for better subsidy \
             schemes."
        );
    }
}
