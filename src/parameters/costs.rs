//! Unit rates used to cost a design and to value its benefits.
use super::{check_non_negative, check_positive};
use crate::input::deserialise_proportion;
use crate::lookup::{Tier, TierTable};
use crate::units::{
    Dimensionless, Litres, Metres, Money, MoneyPerCubicMetre, MoneyPerLitre, MoneyPerMetre,
    MoneyPerSquareMetre, MoneyPerYear, Years,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Construction material for the storage tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize, Deserialize)]
pub enum TankMaterial {
    /// Ferro-cement, used for small tanks
    #[serde(rename = "Ferro-cement")]
    #[strum(serialize = "Ferro-cement")]
    FerroCement,
    /// Brick or stone masonry
    Masonry,
    /// Reinforced cement concrete, used for the largest tanks
    #[serde(rename = "RCC")]
    #[strum(serialize = "RCC")]
    Rcc,
}

/// The material and rate used for tanks up to a given capacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankMaterialTier {
    /// Largest capacity for which this material is used
    pub max_capacity: Litres,
    /// Construction material
    pub material: TankMaterial,
    /// Cost per litre of capacity
    pub rate: MoneyPerLitre,
}

impl Tier for TankMaterialTier {
    type Key = Litres;

    fn threshold(&self) -> Litres {
        self.max_capacity
    }
}

fn tank_materials() -> TierTable<TankMaterialTier> {
    // Capacities above the last threshold fall back to RCC
    let tiers = [
        (15_000.0, TankMaterial::FerroCement, 13.0),
        (50_000.0, TankMaterial::Masonry, 11.0),
        (100_000.0, TankMaterial::Rcc, 17.0),
    ]
    .into_iter()
    .map(|(max_capacity, material, rate)| TankMaterialTier {
        max_capacity: Litres(max_capacity),
        material,
        rate: MoneyPerLitre(rate),
    })
    .collect();

    TierTable::new(tiers).expect("Default tank material tiers are valid")
}

/// Rates for gutters, downpipes and the first-flush device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipingRates {
    /// Cost per metre of gutter
    pub gutter: MoneyPerMetre,
    /// Cost per metre of downpipe
    pub downpipe: MoneyPerMetre,
    /// Cost of a first-flush diverter
    pub first_flush_device: Money,
    /// Gutter length assumed per m² of roof when none is given
    pub default_gutter_length_per_roof_area: f64,
    /// Downpipe length assumed when none is given
    pub default_downpipe_length: Metres,
}

impl Default for PipingRates {
    fn default() -> Self {
        Self {
            gutter: MoneyPerMetre(300.0),
            downpipe: MoneyPerMetre(200.0),
            first_flush_device: Money(650.0),
            default_gutter_length_per_roof_area: 0.4,
            default_downpipe_length: Metres(5.0),
        }
    }
}

/// Rates for the sand filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRates {
    /// Base cost of a slow sand filter unit
    pub slow_sand: Money,
    /// Base cost of a rapid sand filter unit
    pub rapid_sand: Money,
    /// Depth of filter media
    pub media_depth: Metres,
    /// Cost per m³ of filter media
    pub media: MoneyPerCubicMetre,
}

impl Default for FilterRates {
    fn default() -> Self {
        Self {
            slow_sand: Money(3000.0),
            rapid_sand: Money(4000.0),
            media_depth: Metres(0.9),
            media: MoneyPerCubicMetre(800.0),
        }
    }
}

/// Rates for recharge pits and shafts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RechargeRates {
    /// Cost per m³ of pit excavation
    pub excavation: MoneyPerCubicMetre,
    /// Cost per m³ of pit filling media
    pub pit_media: MoneyPerCubicMetre,
    /// Thickness of the masonry pit lining
    pub pit_lining_thickness: Metres,
    /// Cost per m³ of masonry lining
    pub masonry: MoneyPerCubicMetre,
    /// Cost per metre of shaft drilling
    pub shaft_drilling: MoneyPerMetre,
    /// Thickness of the concrete shaft casing
    pub shaft_casing_thickness: Metres,
    /// Cost per m³ of shaft casing
    pub casing: MoneyPerCubicMetre,
}

impl Default for RechargeRates {
    fn default() -> Self {
        Self {
            excavation: MoneyPerCubicMetre(250.0),
            pit_media: MoneyPerCubicMetre(800.0),
            pit_lining_thickness: Metres(0.23),
            masonry: MoneyPerCubicMetre(500.0),
            shaft_drilling: MoneyPerMetre(3000.0),
            shaft_casing_thickness: Metres(0.1),
            casing: MoneyPerCubicMetre(5500.0),
        }
    }
}

/// Rates for the civil works around the tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CivilRates {
    /// Cost per m³ of excavation
    pub excavation: MoneyPerCubicMetre,
    /// Thickness of the concrete foundation slab
    pub foundation_thickness: Metres,
    /// Cost per m³ of foundation concrete
    pub concrete: MoneyPerCubicMetre,
    /// Cost per m² of plastering
    pub plastering: MoneyPerSquareMetre,
}

impl Default for CivilRates {
    fn default() -> Self {
        Self {
            excavation: MoneyPerCubicMetre(250.0),
            foundation_thickness: Metres(0.15),
            concrete: MoneyPerCubicMetre(5500.0),
            plastering: MoneyPerSquareMetre(50.0),
        }
    }
}

/// Recurring costs of keeping the system running
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceRates {
    /// Annual roof, gutter and tank cleaning
    pub cleaning: MoneyPerYear,
    /// Annual disinfection of stored water
    pub disinfection: MoneyPerYear,
    /// Cost of replacing the filter media
    pub filter_replacement: Money,
    /// How often the filter media is replaced
    pub filter_replacement_interval: Years,
}

impl Default for MaintenanceRates {
    fn default() -> Self {
        Self {
            cleaning: MoneyPerYear(1500.0),
            disinfection: MoneyPerYear(750.0),
            filter_replacement: Money(3000.0),
            filter_replacement_interval: Years(3.0),
        }
    }
}

impl MaintenanceRates {
    /// Total maintenance cost per year, with filter replacement spread over its interval
    pub fn annual_cost(&self) -> MoneyPerYear {
        self.cleaning
            + self.disinfection
            + MoneyPerYear(self.filter_replacement.value() / self.filter_replacement_interval.value())
    }
}

/// Fractions of the capital cost which make up its annualised cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnualCostFractions {
    /// Interest foregone on the capital
    #[serde(deserialize_with = "deserialise_proportion")]
    pub interest: Dimensionless,
    /// Maintenance and repair of the structures
    #[serde(deserialize_with = "deserialise_proportion")]
    pub maintenance_repair: Dimensionless,
    /// Depreciation of the structures
    #[serde(deserialize_with = "deserialise_proportion")]
    pub depreciation: Dimensionless,
    /// Other costs
    #[serde(deserialize_with = "deserialise_proportion")]
    pub miscellaneous: Dimensionless,
}

impl Default for AnnualCostFractions {
    fn default() -> Self {
        Self {
            interest: Dimensionless(0.10),
            maintenance_repair: Dimensionless(0.025),
            depreciation: Dimensionless(0.05),
            miscellaneous: Dimensionless(0.01),
        }
    }
}

/// Rates used to value the annual benefits of harvesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitRates {
    /// Price of water from the alternative supply (e.g. tanker)
    pub alternative_water: MoneyPerCubicMetre,
    /// Energy needed to pump each m³ of groundwater (kWh/m³)
    pub pumping_energy: f64,
    /// Electricity tariff (per kWh)
    pub electricity_tariff: f64,
    /// Pump maintenance avoided each year when the water table rises
    pub pump_maintenance: MoneyPerYear,
}

impl Default for BenefitRates {
    fn default() -> Self {
        Self {
            alternative_water: MoneyPerCubicMetre(20.0),
            pumping_energy: 0.5,
            electricity_tariff: 7.0,
            pump_maintenance: MoneyPerYear(2000.0),
        }
    }
}

/// Unit rates used by the economics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    /// Tank material and per-litre rate by capacity
    pub tank_materials: TierTable<TankMaterialTier>,
    /// Collection system rates
    pub piping: PipingRates,
    /// Filter rates
    pub filter: FilterRates,
    /// Recharge structure rates
    pub recharge: RechargeRates,
    /// Civil works rates
    pub civil: CivilRates,
    /// Labour as a fraction of the material cost
    #[serde(deserialize_with = "deserialise_proportion")]
    pub labour_fraction: Dimensionless,
    /// Recurring maintenance costs
    pub maintenance: MaintenanceRates,
    /// Annualised cost of capital
    pub annual_cost_fractions: AnnualCostFractions,
    /// Benefit valuation rates
    pub benefits: BenefitRates,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            tank_materials: tank_materials(),
            piping: PipingRates::default(),
            filter: FilterRates::default(),
            recharge: RechargeRates::default(),
            civil: CivilRates::default(),
            labour_fraction: Dimensionless(0.12),
            maintenance: MaintenanceRates::default(),
            annual_cost_fractions: AnnualCostFractions::default(),
            benefits: BenefitRates::default(),
        }
    }
}

impl CostRates {
    /// Check that every rate is finite and not negative
    pub fn validate(&self) -> Result<()> {
        for tier in self.tank_materials.iter() {
            check_non_negative(tier.rate.value(), "Tank material rate")?;
        }

        let piping = &self.piping;
        check_non_negative(piping.gutter.value(), "Gutter rate")?;
        check_non_negative(piping.downpipe.value(), "Downpipe rate")?;
        check_non_negative(piping.first_flush_device.value(), "First flush device cost")?;
        check_non_negative(
            piping.default_gutter_length_per_roof_area,
            "default_gutter_length_per_roof_area",
        )?;
        check_non_negative(
            piping.default_downpipe_length.value(),
            "default_downpipe_length",
        )?;

        let filter = &self.filter;
        for (value, name) in [
            (filter.slow_sand.value(), "Slow sand filter cost"),
            (filter.rapid_sand.value(), "Rapid sand filter cost"),
            (filter.media_depth.value(), "Filter media depth"),
            (filter.media.value(), "Filter media rate"),
        ] {
            check_non_negative(value, name)?;
        }

        let recharge = &self.recharge;
        for (value, name) in [
            (recharge.excavation.value(), "Recharge excavation rate"),
            (recharge.pit_media.value(), "Pit media rate"),
            (recharge.pit_lining_thickness.value(), "Pit lining thickness"),
            (recharge.masonry.value(), "Masonry rate"),
            (recharge.shaft_drilling.value(), "Shaft drilling rate"),
            (recharge.shaft_casing_thickness.value(), "Shaft casing thickness"),
            (recharge.casing.value(), "Shaft casing rate"),
        ] {
            check_non_negative(value, name)?;
        }

        let civil = &self.civil;
        for (value, name) in [
            (civil.excavation.value(), "Civil excavation rate"),
            (civil.foundation_thickness.value(), "Foundation thickness"),
            (civil.concrete.value(), "Concrete rate"),
            (civil.plastering.value(), "Plastering rate"),
        ] {
            check_non_negative(value, name)?;
        }

        let maintenance = &self.maintenance;
        check_non_negative(maintenance.cleaning.value(), "Cleaning cost")?;
        check_non_negative(maintenance.disinfection.value(), "Disinfection cost")?;
        check_non_negative(
            maintenance.filter_replacement.value(),
            "Filter replacement cost",
        )?;
        check_positive(
            maintenance.filter_replacement_interval.value(),
            "filter_replacement_interval",
        )?;

        let benefits = &self.benefits;
        for (value, name) in [
            (benefits.alternative_water.value(), "Alternative water price"),
            (benefits.pumping_energy, "Pumping energy"),
            (benefits.electricity_tariff, "Electricity tariff"),
            (benefits.pump_maintenance.value(), "Pump maintenance saving"),
        ] {
            check_non_negative(value, name)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;

    #[rstest]
    #[case(1000.0, TankMaterial::FerroCement, 13.0)]
    #[case(15_000.0, TankMaterial::FerroCement, 13.0)]
    #[case(15_001.0, TankMaterial::Masonry, 11.0)]
    #[case(50_000.0, TankMaterial::Masonry, 11.0)]
    #[case(60_000.0, TankMaterial::Rcc, 17.0)]
    #[case(1_000_000.0, TankMaterial::Rcc, 17.0)]
    fn test_tank_material_selection(
        #[case] capacity: f64,
        #[case] material: TankMaterial,
        #[case] rate: f64,
    ) {
        let rates = CostRates::default();
        let (tier, _) = rates.tank_materials.select(Litres(capacity));
        assert_eq!(tier.material, material);
        assert_eq!(tier.rate, MoneyPerLitre(rate));
    }

    #[test]
    fn test_annual_maintenance_cost() {
        assert_eq!(
            MaintenanceRates::default().annual_cost(),
            MoneyPerYear(3250.0)
        );
    }

    #[test]
    fn test_tank_material_names() {
        assert_eq!(TankMaterial::FerroCement.to_string(), "Ferro-cement");
        assert_eq!(TankMaterial::Rcc.to_string(), "RCC");
    }

    #[test]
    fn test_validate_negative_rate() {
        let mut rates = CostRates::default();
        rates.piping.gutter = MoneyPerMetre(-300.0);
        assert_error!(
            rates.validate(),
            "Gutter rate must be a finite number of at least zero"
        );
    }

    #[test]
    fn test_validate_zero_replacement_interval() {
        let mut rates = CostRates::default();
        rates.maintenance.filter_replacement_interval = Years(0.0);
        assert_error!(
            rates.validate(),
            "filter_replacement_interval must be a finite number greater than zero"
        );
    }

    #[test]
    fn test_deserialise_labour_fraction() {
        let rates: CostRates = toml::from_str("labour_fraction = 0.2").unwrap();
        assert_eq!(rates.labour_fraction, Dimensionless(0.2));
        assert!(toml::from_str::<CostRates>("labour_fraction = 2.0").is_err());
    }
}
