//! Engineering tables used to size a rainwater harvesting system.
use super::{check_non_negative, check_positive};
use crate::input::deserialise_proportion;
use crate::lookup::{Tier, TierTable};
use crate::project::RoofMaterial;
use crate::units::{
    Dimensionless, Litres, LitresPerHourPerSquareMetre, LitresPerSecond, Metres, Millimetres,
    SquareMetres,
};
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A standard storage tank size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankTier {
    /// Nominal capacity of the tank
    pub capacity: Litres,
    /// Internal diameter of the tank
    pub diameter: Metres,
}

impl Tier for TankTier {
    type Key = Litres;

    fn threshold(&self) -> Litres {
        self.capacity
    }
}

/// A standard half-round gutter size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GutterTier {
    /// Nominal diameter of the gutter
    pub diameter: Millimetres,
    /// Maximum flow the gutter can carry
    pub capacity: LitresPerSecond,
}

impl Tier for GutterTier {
    type Key = LitresPerSecond;

    fn threshold(&self) -> LitresPerSecond {
        self.capacity
    }
}

/// A standard downpipe size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownpipeTier {
    /// Largest peak flow for which this downpipe is used
    pub max_flow: LitresPerSecond,
    /// Nominal diameter of the downpipe
    pub diameter: Millimetres,
}

impl Tier for DownpipeTier {
    type Key = LitresPerSecond;

    fn threshold(&self) -> LitresPerSecond {
        self.max_flow
    }
}

fn tank_tiers() -> TierTable<TankTier> {
    let tiers = [
        (1600.0, 1.21),
        (2400.0, 1.48),
        (3200.0, 1.71),
        (4000.0, 1.91),
        (6400.0, 2.41),
        (8000.0, 2.70),
        (10000.0, 3.00),
        (12000.0, 3.30),
        (16000.0, 3.81),
        (20000.0, 4.26),
    ]
    .into_iter()
    .map(|(capacity, diameter)| TankTier {
        capacity: Litres(capacity),
        diameter: Metres(diameter),
    })
    .collect();

    TierTable::new(tiers).expect("Default tank tiers are valid")
}

fn gutter_tiers() -> TierTable<GutterTier> {
    let tiers = [
        (100.0, 1.08),
        (150.0, 2.97),
        (200.0, 6.10),
        (250.0, 10.67),
        (300.0, 16.82),
    ]
    .into_iter()
    .map(|(diameter, capacity)| GutterTier {
        diameter: Millimetres(diameter),
        capacity: LitresPerSecond(capacity),
    })
    .collect();

    TierTable::new(tiers).expect("Default gutter tiers are valid")
}

fn downpipe_tiers() -> TierTable<DownpipeTier> {
    // Flows above the last threshold fall back to the largest pipe
    let tiers = [(1.0, 50.0), (3.0, 75.0), (6.0, 100.0)]
        .into_iter()
        .map(|(max_flow, diameter)| DownpipeTier {
            max_flow: LitresPerSecond(max_flow),
            diameter: Millimetres(diameter),
        })
        .collect();

    TierTable::new(tiers).expect("Default downpipe tiers are valid")
}

/// Fraction of rainfall which becomes collectable runoff for each roofing material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunoffCoefficients {
    /// Galvanised iron sheeting
    #[serde(deserialize_with = "deserialise_proportion")]
    pub gi_sheet: Dimensionless,
    /// Asbestos cement sheeting
    #[serde(deserialize_with = "deserialise_proportion")]
    pub asbestos: Dimensionless,
    /// Clay or concrete tiles
    #[serde(deserialize_with = "deserialise_proportion")]
    pub tiles: Dimensionless,
    /// Concrete slab
    #[serde(deserialize_with = "deserialise_proportion")]
    pub concrete: Dimensionless,
    /// Any material not listed above
    #[serde(deserialize_with = "deserialise_proportion")]
    pub other: Dimensionless,
}

impl Default for RunoffCoefficients {
    fn default() -> Self {
        Self {
            gi_sheet: Dimensionless(0.9),
            asbestos: Dimensionless(0.8),
            tiles: Dimensionless(0.75),
            concrete: Dimensionless(0.7),
            other: Dimensionless(0.7),
        }
    }
}

impl RunoffCoefficients {
    /// Get the runoff coefficient for the given roofing material
    pub fn get(&self, material: RoofMaterial) -> Dimensionless {
        match material {
            RoofMaterial::GiSheet => self.gi_sheet,
            RoofMaterial::Asbestos => self.asbestos,
            RoofMaterial::Tiles => self.tiles,
            RoofMaterial::Concrete => self.concrete,
            RoofMaterial::Other => self.other,
        }
    }
}

/// Sizing rules for the sand filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    /// Peak flows above this need a rapid sand filter
    pub rapid_sand_threshold: LitresPerSecond,
    /// Filtration rate of a slow sand filter
    pub slow_sand_rate: LitresPerHourPerSquareMetre,
    /// Filtration rate of a rapid sand filter
    pub rapid_sand_rate: LitresPerHourPerSquareMetre,
    /// Plan dimensions are rounded up to a multiple of this
    pub plan_increment: Metres,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            rapid_sand_threshold: LitresPerSecond(2.0),
            slow_sand_rate: LitresPerHourPerSquareMetre(150.0),
            rapid_sand_rate: LitresPerHourPerSquareMetre(4500.0),
            plan_increment: Metres(0.1),
        }
    }
}

/// Selection and sizing rules for groundwater recharge structures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RechargeParameters {
    /// Water tables shallower than this get a shallow recharge pit
    pub shallow_pit_max_depth: Metres,
    /// Water tables at least this deep get a recharge shaft
    pub shaft_min_depth: Metres,
    /// Diameter of a recharge pit
    pub pit_diameter: Metres,
    /// Depth of a recharge pit when the water table depth is unknown
    pub pit_default_depth: Metres,
    /// Maximum depth of a recharge pit
    pub pit_max_depth: Metres,
    /// Unsaturated zone left between the bottom of a pit and the water table
    pub pit_clearance: Metres,
    /// Diameter of a recharge shaft
    pub shaft_diameter: Metres,
    /// Depth of a recharge shaft when the water table depth is unknown
    pub shaft_default_depth: Metres,
    /// Maximum depth of a recharge shaft
    pub shaft_max_depth: Metres,
    /// Distance a shaft extends below the water table
    pub shaft_extension: Metres,
}

impl Default for RechargeParameters {
    fn default() -> Self {
        Self {
            shallow_pit_max_depth: Metres(5.0),
            shaft_min_depth: Metres(15.0),
            pit_diameter: Metres(1.5),
            pit_default_depth: Metres(3.0),
            pit_max_depth: Metres(5.0),
            pit_clearance: Metres(1.0),
            shaft_diameter: Metres(0.75),
            shaft_default_depth: Metres(10.0),
            shaft_max_depth: Metres(15.0),
            shaft_extension: Metres(2.0),
        }
    }
}

/// Thresholds which trigger warnings and recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceThresholds {
    /// Annual rainfall below this is considered low
    pub low_rainfall: Millimetres,
    /// Annual rainfall above this is considered high
    pub high_rainfall: Millimetres,
    /// Pre-monsoon water tables shallower than this risk waterlogging
    pub shallow_water_table: Metres,
    /// Roofs smaller than this may not be economic
    pub small_roof_area: SquareMetres,
    /// Peak flows above this need multiple collection points
    pub high_peak_flow: LitresPerSecond,
    /// Available water above this multiple of the requirement counts as surplus
    pub surplus_factor: Dimensionless,
    /// Soil infiltration rates (mm/hr) above this suit percolation pits
    pub high_infiltration_rate: f64,
    /// Tanks larger than this should be split
    pub large_tank: Litres,
}

impl Default for AdviceThresholds {
    fn default() -> Self {
        Self {
            low_rainfall: Millimetres(500.0),
            high_rainfall: Millimetres(1000.0),
            shallow_water_table: Metres(3.0),
            small_roof_area: SquareMetres(20.0),
            high_peak_flow: LitresPerSecond(10.0),
            surplus_factor: Dimensionless(1.5),
            high_infiltration_rate: 20.0,
            large_tank: Litres(5000.0),
        }
    }
}

/// Engineering tables used by the design engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    /// Runoff coefficient for each roofing material
    pub runoff_coefficients: RunoffCoefficients,
    /// Drinking and cooking water needed per person per day
    pub daily_water_allowance: Litres,
    /// Tank capacities are rounded up to a multiple of this
    pub tank_capacity_increment: Litres,
    /// Standard tank sizes
    pub tank_tiers: TierTable<TankTier>,
    /// Height of all standard tanks
    pub tank_height: Metres,
    /// Standard gutter sizes
    pub gutter_tiers: TierTable<GutterTier>,
    /// Standard downpipe sizes
    pub downpipe_tiers: TierTable<DownpipeTier>,
    /// Depth of initial runoff diverted by the first-flush device
    pub first_flush_depth: Millimetres,
    /// Sand filter sizing rules
    pub filter: FilterParameters,
    /// Recharge structure rules
    pub recharge: RechargeParameters,
    /// Warning and recommendation thresholds
    pub advice: AdviceThresholds,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            runoff_coefficients: RunoffCoefficients::default(),
            daily_water_allowance: Litres(6.0),
            tank_capacity_increment: Litres(1000.0),
            tank_tiers: tank_tiers(),
            tank_height: Metres(1.6),
            gutter_tiers: gutter_tiers(),
            downpipe_tiers: downpipe_tiers(),
            first_flush_depth: Millimetres(0.5),
            filter: FilterParameters::default(),
            recharge: RechargeParameters::default(),
            advice: AdviceThresholds::default(),
        }
    }
}

impl DesignParameters {
    /// Check that the tables describe a physically meaningful design
    pub fn validate(&self) -> Result<()> {
        for material in RoofMaterial::iter() {
            let coefficient = self.runoff_coefficients.get(material);
            ensure!(
                coefficient > Dimensionless(0.0),
                "Runoff coefficient for {material} must be greater than zero"
            );
        }

        check_non_negative(self.daily_water_allowance.value(), "daily_water_allowance")?;
        check_positive(
            self.tank_capacity_increment.value(),
            "tank_capacity_increment",
        )?;
        check_positive(self.tank_height.value(), "tank_height")?;
        check_non_negative(self.first_flush_depth.value(), "first_flush_depth")?;

        for tier in self.tank_tiers.iter() {
            check_positive(tier.capacity.value(), "Tank tier capacity")?;
            check_positive(tier.diameter.value(), "Tank tier diameter")?;
        }
        for tier in self.gutter_tiers.iter() {
            check_positive(tier.capacity.value(), "Gutter tier capacity")?;
            check_positive(tier.diameter.value(), "Gutter tier diameter")?;
        }
        for tier in self.downpipe_tiers.iter() {
            check_positive(tier.diameter.value(), "Downpipe tier diameter")?;
        }

        let filter = &self.filter;
        check_non_negative(filter.rapid_sand_threshold.value(), "rapid_sand_threshold")?;
        check_positive(filter.slow_sand_rate.value(), "slow_sand_rate")?;
        check_positive(filter.rapid_sand_rate.value(), "rapid_sand_rate")?;
        check_positive(filter.plan_increment.value(), "plan_increment")?;

        let recharge = &self.recharge;
        ensure!(
            recharge.shallow_pit_max_depth <= recharge.shaft_min_depth,
            "shallow_pit_max_depth cannot be greater than shaft_min_depth"
        );
        for (value, name) in [
            (recharge.pit_diameter, "pit_diameter"),
            (recharge.pit_default_depth, "pit_default_depth"),
            (recharge.pit_max_depth, "pit_max_depth"),
            (recharge.shaft_diameter, "shaft_diameter"),
            (recharge.shaft_default_depth, "shaft_default_depth"),
            (recharge.shaft_max_depth, "shaft_max_depth"),
        ] {
            check_positive(value.value(), name)?;
        }
        check_non_negative(recharge.pit_clearance.value(), "pit_clearance")?;
        check_non_negative(recharge.shaft_extension.value(), "shaft_extension")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;

    #[rstest]
    #[case(RoofMaterial::GiSheet, 0.9)]
    #[case(RoofMaterial::Asbestos, 0.8)]
    #[case(RoofMaterial::Tiles, 0.75)]
    #[case(RoofMaterial::Concrete, 0.7)]
    #[case(RoofMaterial::Other, 0.7)]
    fn test_default_runoff_coefficients(#[case] material: RoofMaterial, #[case] expected: f64) {
        let coefficients = RunoffCoefficients::default();
        assert_eq!(coefficients.get(material), Dimensionless(expected));
    }

    #[test]
    fn test_default_tables() {
        let params = DesignParameters::default();
        assert_eq!(params.tank_tiers.iter().count(), 10);
        assert_eq!(params.tank_tiers.largest().capacity, Litres(20000.0));
        assert_eq!(params.gutter_tiers.largest().diameter, Millimetres(300.0));
        assert_eq!(params.downpipe_tiers.largest().diameter, Millimetres(100.0));
    }

    #[test]
    fn test_validate_zero_coefficient() {
        let mut params = DesignParameters::default();
        params.runoff_coefficients.tiles = Dimensionless(0.0);
        assert_error!(
            params.validate(),
            "Runoff coefficient for Tiles must be greater than zero"
        );
    }

    #[test]
    fn test_validate_recharge_depths() {
        let mut params = DesignParameters::default();
        params.recharge.shallow_pit_max_depth = Metres(20.0);
        assert_error!(
            params.validate(),
            "shallow_pit_max_depth cannot be greater than shaft_min_depth"
        );
    }

    #[test]
    fn test_deserialise_runoff_out_of_range() {
        assert!(toml::from_str::<RunoffCoefficients>("tiles = 1.2").is_err());

        let coefficients: RunoffCoefficients = toml::from_str("tiles = 0.6").unwrap();
        assert_eq!(coefficients.tiles, Dimensionless(0.6));
        assert_eq!(coefficients.gi_sheet, Dimensionless(0.9));
    }
}
