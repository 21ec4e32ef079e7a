//! Site, costing and appraisal inputs for a single assessment.
//!
//! A project file is a TOML file with a mandatory `[site]` section and optional `[costs]`,
//! `[benefits]` and `[appraisal]` sections, e.g.:
//!
//! ```toml
//! name = "Sharma residence"
//!
//! [site]
//! roof_area = 100.0
//! roof_material = "Concrete"
//! household_size = 4
//! water_scarcity_days = 90
//! annual_rainfall = 1000.0
//! rainfall_intensity = 50.0
//! aquifer_type = "Unconsolidated"
//! ```
use crate::error::{InvalidInputError, is_non_negative, is_positive};
use crate::input::{input_err_msg, read_toml};
use crate::units::{Dimensionless, Litres, Metres, Millimetres, MillimetresPerHour, SquareMetres};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumIter, IntoStaticStr};

/// The maximum length of the water scarcity period
const DAYS_PER_YEAR: u32 = 365;

/// Roofing material, which determines how much rainfall becomes collectable runoff
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum RoofMaterial {
    /// Galvanised iron sheeting
    #[serde(rename = "GI Sheet")]
    #[strum(serialize = "GI Sheet")]
    GiSheet,
    /// Asbestos cement sheeting
    Asbestos,
    /// Clay or concrete tiles
    Tiles,
    /// Concrete slab
    Concrete,
    /// Any other roofing (thatch, bitumen etc.)
    Other,
}

/// Hydrogeological class of the underlying aquifer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize, Deserialize)]
pub enum AquiferType {
    /// Hard rock, where water moves through fractures
    Consolidated,
    /// Partly cemented sediments
    #[serde(rename = "Semi-consolidated")]
    #[strum(serialize = "Semi-consolidated")]
    SemiConsolidated,
    /// Loose alluvial sediments
    Unconsolidated,
}

/// Site and building parameters supplied by the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectInput {
    /// Plan area of the roof catchment
    pub roof_area: SquareMetres,
    /// Roofing material
    pub roof_material: RoofMaterial,
    /// Number of people in the household
    pub household_size: u32,
    /// Number of days per year for which harvested water must cover demand
    pub water_scarcity_days: u32,
    /// Average annual rainfall
    pub annual_rainfall: Millimetres,
    /// Design rainfall intensity for sizing the collection system
    pub rainfall_intensity: MillimetresPerHour,
    /// Aquifer beneath the site
    pub aquifer_type: AquiferType,
    /// Depth to the water table before the monsoon
    #[serde(default)]
    pub depth_water_premonsoon: Option<Metres>,
    /// Depth to the water table after the monsoon
    #[serde(default)]
    pub depth_water_postmonsoon: Option<Metres>,
    /// Description of the soil (informational only)
    #[serde(default)]
    pub soil_type: Option<String>,
    /// Soil infiltration rate (mm/hr)
    #[serde(default)]
    pub infiltration_rate: Option<f64>,
    /// Open land available for tanks and recharge structures
    #[serde(default)]
    pub available_space: Option<SquareMetres>,
}

impl ProjectInput {
    /// Check that all values are within the ranges for which the design formulae are meaningful
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !is_positive(self.roof_area.value()) {
            return Err(InvalidInputError::RoofArea(self.roof_area.value()));
        }
        if self.household_size == 0 {
            return Err(InvalidInputError::HouseholdSize);
        }
        if self.water_scarcity_days > DAYS_PER_YEAR {
            return Err(InvalidInputError::WaterScarcityDays(
                self.water_scarcity_days,
            ));
        }
        if !is_positive(self.annual_rainfall.value()) {
            return Err(InvalidInputError::AnnualRainfall(
                self.annual_rainfall.value(),
            ));
        }
        if !is_positive(self.rainfall_intensity.value()) {
            return Err(InvalidInputError::RainfallIntensity(
                self.rainfall_intensity.value(),
            ));
        }

        for (season, depth) in [
            ("pre-monsoon", self.depth_water_premonsoon),
            ("post-monsoon", self.depth_water_postmonsoon),
        ] {
            if let Some(depth) = depth
                && !is_positive(depth.value())
            {
                return Err(InvalidInputError::WaterTableDepth {
                    season,
                    value: depth.value(),
                });
            }
        }

        if let Some(rate) = self.infiltration_rate
            && !is_non_negative(rate)
        {
            return Err(InvalidInputError::InfiltrationRate(rate));
        }
        if let Some(space) = self.available_space
            && !is_non_negative(space.value())
        {
            return Err(InvalidInputError::AvailableSpace(space.value()));
        }

        Ok(())
    }

    /// The seasonal rise in the water table, if both depths are known.
    ///
    /// Positive values mean the water table is closer to the surface after the monsoon.
    pub fn depth_reduction(&self) -> Option<Metres> {
        Some(self.depth_water_premonsoon? - self.depth_water_postmonsoon?)
    }
}

/// Site-specific quantities needed for costing which are not part of the design
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CostInput {
    /// Total length of roof gutters (defaults to 0.4 m per m² of roof)
    #[serde(default)]
    pub gutter_length: Option<Metres>,
    /// Total length of downpipes (defaults to 5 m)
    #[serde(default)]
    pub downpipe_length: Option<Metres>,
    /// Region in which the system will be built (informational only)
    #[serde(default)]
    pub region: Option<String>,
}

impl CostInput {
    /// Check that pipe lengths, if given, are not negative
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        for (name, length) in [
            ("Gutter length", self.gutter_length),
            ("Downpipe length", self.downpipe_length),
        ] {
            if let Some(length) = length
                && !is_non_negative(length.value())
            {
                return Err(InvalidInputError::PipeLength {
                    name,
                    value: length.value(),
                });
            }
        }

        Ok(())
    }
}

/// Quantities from which the annual monetary benefit of the system is estimated
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenefitInput {
    /// Volume of water per year which no longer has to be bought from other sources
    pub water_savings_volume: Litres,
    /// Seasonal rise in the water table attributed to recharge
    #[serde(default)]
    pub depth_reduction: Option<Metres>,
}

impl BenefitInput {
    /// Check that the water savings volume is not negative
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !is_non_negative(self.water_savings_volume.value()) {
            return Err(InvalidInputError::WaterSavingsVolume(
                self.water_savings_volume.value(),
            ));
        }

        Ok(())
    }
}

/// The longest appraisal period accepted
pub const MAX_HORIZON_YEARS: u32 = 100;

const fn default_horizon_years() -> u32 {
    20
}

const fn default_discount_rate() -> Dimensionless {
    Dimensionless(0.08)
}

/// Options for the discounted cash-flow appraisal
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AppraisalOptions {
    /// Length of the appraisal period
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
    /// Annual discount rate applied to future net benefits
    #[serde(default = "default_discount_rate")]
    pub discount_rate: Dimensionless,
    /// Fraction of the capital cost covered by a subsidy
    #[serde(default)]
    pub subsidy_fraction: Dimensionless,
}

impl Default for AppraisalOptions {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            discount_rate: default_discount_rate(),
            subsidy_fraction: Dimensionless(0.0),
        }
    }
}

impl AppraisalOptions {
    /// Check the appraisal period, discount rate and subsidy fraction are usable
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !(1..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(InvalidInputError::HorizonYears(self.horizon_years));
        }
        if !is_non_negative(self.discount_rate.value()) {
            return Err(InvalidInputError::DiscountRate(self.discount_rate.value()));
        }

        let subsidy = self.subsidy_fraction.value();
        if !(is_non_negative(subsidy) && subsidy < 1.0) {
            return Err(InvalidInputError::SubsidyFraction(subsidy));
        }

        Ok(())
    }
}

/// The contents of a project file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    /// A human-readable name for the project
    #[serde(default)]
    pub name: Option<String>,
    /// Where the site is located
    #[serde(default)]
    pub location: Option<String>,
    /// Site and building parameters
    pub site: ProjectInput,
    /// Extra inputs for costing
    #[serde(default)]
    pub costs: CostInput,
    /// Explicit benefit inputs. If absent, these are derived from the design.
    #[serde(default)]
    pub benefits: Option<BenefitInput>,
    /// Options for the economic appraisal
    #[serde(default)]
    pub appraisal: AppraisalOptions,
}

impl Project {
    /// Read and validate a project file.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to the project TOML file
    pub fn from_path(file_path: &Path) -> Result<Project> {
        let project: Project = read_toml(file_path)?;
        project
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(project)
    }

    /// Validate all sections of the project
    fn validate(&self) -> Result<()> {
        self.site.validate()?;
        self.costs.validate()?;
        if let Some(benefits) = &self.benefits {
            benefits.validate()?;
        }
        self.appraisal.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, project_input};
    use rstest::rstest;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[rstest]
    fn test_validate_ok(project_input: ProjectInput) {
        assert_eq!(project_input.validate(), Ok(()));
    }

    #[rstest]
    #[case::zero_roof(|i: &mut ProjectInput| i.roof_area = SquareMetres(0.0), InvalidInputError::RoofArea(0.0))]
    #[case::negative_roof(|i: &mut ProjectInput| i.roof_area = SquareMetres(-10.0), InvalidInputError::RoofArea(-10.0))]
    #[case::empty_household(|i: &mut ProjectInput| i.household_size = 0, InvalidInputError::HouseholdSize)]
    #[case::long_scarcity(|i: &mut ProjectInput| i.water_scarcity_days = 366, InvalidInputError::WaterScarcityDays(366))]
    #[case::no_rain(|i: &mut ProjectInput| i.annual_rainfall = Millimetres(0.0), InvalidInputError::AnnualRainfall(0.0))]
    #[case::no_intensity(|i: &mut ProjectInput| i.rainfall_intensity = MillimetresPerHour(-1.0), InvalidInputError::RainfallIntensity(-1.0))]
    #[case::surface_water_table(
        |i: &mut ProjectInput| i.depth_water_premonsoon = Some(Metres(0.0)),
        InvalidInputError::WaterTableDepth { season: "pre-monsoon", value: 0.0 }
    )]
    #[case::negative_infiltration(|i: &mut ProjectInput| i.infiltration_rate = Some(-2.0), InvalidInputError::InfiltrationRate(-2.0))]
    fn test_validate_invalid(
        mut project_input: ProjectInput,
        #[case] modify: fn(&mut ProjectInput),
        #[case] expected: InvalidInputError,
    ) {
        modify(&mut project_input);
        assert_eq!(project_input.validate(), Err(expected));
    }

    #[rstest]
    fn test_depth_reduction(mut project_input: ProjectInput) {
        assert_eq!(project_input.depth_reduction(), None);

        project_input.depth_water_premonsoon = Some(Metres(8.0));
        assert_eq!(project_input.depth_reduction(), None);

        project_input.depth_water_postmonsoon = Some(Metres(5.5));
        assert_eq!(project_input.depth_reduction(), Some(Metres(2.5)));
    }

    #[rstest]
    #[case(20, 0.0, 0.0, true)]
    #[case(20, 0.08, 0.5, true)]
    #[case(1, 0.08, 0.0, true)]
    #[case(100, 0.08, 0.0, true)]
    #[case(20, -0.01, 0.0, false)]
    #[case(20, 0.08, 1.0, false)]
    #[case(20, 0.08, -0.1, false)]
    #[case(0, 0.08, 0.0, false)]
    #[case(101, 0.08, 0.0, false)]
    #[case(u32::MAX, 0.08, 0.0, false)]
    fn test_appraisal_options_validate(
        #[case] horizon_years: u32,
        #[case] discount_rate: f64,
        #[case] subsidy_fraction: f64,
        #[case] expected_valid: bool,
    ) {
        let options = AppraisalOptions {
            horizon_years,
            discount_rate: Dimensionless(discount_rate),
            subsidy_fraction: Dimensionless(subsidy_fraction),
            ..AppraisalOptions::default()
        };
        assert_eq!(options.validate().is_ok(), expected_valid);
    }

    #[test]
    fn test_cost_input_validate() {
        assert_eq!(CostInput::default().validate(), Ok(()));

        let input = CostInput {
            downpipe_length: Some(Metres(-1.0)),
            ..CostInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(InvalidInputError::PipeLength {
                name: "Downpipe length",
                value: -1.0
            })
        );
    }

    /// Write a project file with the given site section plus extra lines
    fn write_project_file(dir: &Path, extra: &str) -> std::path::PathBuf {
        let file_path = dir.join("project.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            "name = \"Test house\"

[site]
roof_area = 100.0
roof_material = \"Concrete\"
household_size = 4
water_scarcity_days = 90
annual_rainfall = 1000.0
rainfall_intensity = 50.0
aquifer_type = \"Semi-consolidated\"
depth_water_premonsoon = 8.0
{extra}"
        )
        .unwrap();
        file_path
    }

    #[test]
    fn test_project_from_path() {
        let dir = tempdir().unwrap();
        let file_path = write_project_file(dir.path(), "");
        let project = Project::from_path(&file_path).unwrap();

        assert_eq!(project.name.as_deref(), Some("Test house"));
        assert_eq!(project.site.roof_material, RoofMaterial::Concrete);
        assert_eq!(project.site.aquifer_type, AquiferType::SemiConsolidated);
        assert_eq!(project.site.depth_water_premonsoon, Some(Metres(8.0)));
        assert_eq!(project.costs, CostInput::default());
        assert_eq!(project.benefits, None);
        assert_eq!(project.appraisal, AppraisalOptions::default());
    }

    #[test]
    fn test_project_from_path_invalid() {
        let dir = tempdir().unwrap();
        let file_path = write_project_file(dir.path(), "\n[appraisal]\nsubsidy_fraction = 1.5");
        assert_error!(Project::from_path(&file_path), input_err_msg(&file_path));
    }

    #[test]
    fn test_project_from_path_horizon_too_long() {
        let dir = tempdir().unwrap();
        let file_path =
            write_project_file(dir.path(), "\n[appraisal]\nhorizon_years = 4000000000");
        let err = Project::from_path(&file_path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidInputError>(),
            Some(&InvalidInputError::HorizonYears(4_000_000_000))
        );
    }
}
