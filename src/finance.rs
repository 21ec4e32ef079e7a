//! General functions related to finance.
use crate::units::{Dimensionless, Money, MoneyPerYear, Years};
use serde::Serialize;

/// Calculates the factor by which a cash flow `year` years in the future is discounted.
pub fn discount_factor(year: u32, discount_rate: Dimensionless) -> Dimensionless {
    Dimensionless(1.0) / (Dimensionless(1.0) + discount_rate).powf(f64::from(year))
}

/// The discounted value of a single year's net benefit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscountedCashFlow {
    /// Year of operation, starting from 1
    pub year: u32,
    /// Undiscounted net benefit in this year
    pub net_benefit: Money,
    /// Factor applied to the net benefit
    pub discount_factor: Dimensionless,
    /// Discounted net benefit
    pub present_value: Money,
    /// Net present value of the project up to and including this year
    pub cumulative_npv: Money,
}

/// Calculates the discounted cash flows for a constant annual net benefit.
///
/// # Arguments
///
/// * `capital_cost` - Up-front cost, incurred at year 0
/// * `net_benefit` - Benefit minus recurring costs, received at the end of each year
/// * `horizon_years` - Number of years of operation
/// * `discount_rate` - Annual discount rate
pub fn discounted_cash_flows(
    capital_cost: Money,
    net_benefit: MoneyPerYear,
    horizon_years: u32,
    discount_rate: Dimensionless,
) -> Vec<DiscountedCashFlow> {
    let net_benefit = net_benefit * Years(1.0);
    let mut cumulative_npv = -capital_cost;

    (1..=horizon_years)
        .map(|year| {
            let discount_factor = discount_factor(year, discount_rate);
            let present_value = net_benefit * discount_factor;
            cumulative_npv += present_value;

            DiscountedCashFlow {
                year,
                net_benefit,
                discount_factor,
                present_value,
                cumulative_npv,
            }
        })
        .collect()
}

/// The net present value at the end of a series of cash flows.
///
/// With no years of operation, this is just the (negative) capital cost.
pub fn net_present_value(capital_cost: Money, cash_flows: &[DiscountedCashFlow]) -> Money {
    cash_flows
        .last()
        .map_or(-capital_cost, |flow| flow.cumulative_npv)
}

/// Calculates the number of years taken for the net benefit to repay the capital cost.
///
/// If the net benefit is not positive, the capital cost is never repaid and infinity is returned.
pub fn simple_payback(capital_cost: Money, net_benefit: MoneyPerYear) -> Years {
    if net_benefit <= MoneyPerYear(0.0) {
        return Years(f64::INFINITY);
    }

    capital_cost / net_benefit
}
