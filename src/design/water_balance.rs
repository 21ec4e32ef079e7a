//! Annual water balance of the roof catchment.
use crate::parameters::DesignParameters;
use crate::project::ProjectInput;
use crate::units::{Dimensionless, Litres};
use log::debug;

/// How much water the roof yields compared with what the household needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBalance {
    /// Runoff coefficient of the roofing material
    pub runoff_coefficient: Dimensionless,
    /// Runoff collected from the roof in an average year
    pub water_available: Litres,
    /// Water needed to cover the scarcity period
    pub water_required: Litres,
    /// Whether the roof yields enough water to cover the scarcity period
    pub is_feasible: bool,
}

impl WaterBalance {
    /// The volume the tank must store: the requirement if it can be met, else all available water
    pub fn storage_target(&self) -> Litres {
        if self.is_feasible {
            self.water_required
        } else {
            self.water_available
        }
    }
}

/// Calculate the annual water balance for the site
pub fn calculate_water_balance(input: &ProjectInput, params: &DesignParameters) -> WaterBalance {
    let runoff_coefficient = params.runoff_coefficients.get(input.roof_material);
    let water_available = runoff_coefficient * (input.roof_area * input.annual_rainfall);

    let person_days = input.household_size as f64 * input.water_scarcity_days as f64;
    let water_required = params.daily_water_allowance * Dimensionless(person_days);

    let balance = WaterBalance {
        runoff_coefficient,
        water_available,
        water_required,
        is_feasible: water_available >= water_required,
    };
    debug!(
        "Water balance: {} L available, {} L required",
        balance.water_available, balance.water_required
    );

    balance
}
