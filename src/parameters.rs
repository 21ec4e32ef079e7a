//! Defines the [`Parameters`] struct, which holds the engineering and cost tables used for an
//! assessment.
//!
//! Every table has a built-in default. Users can override any part of it with a TOML file whose
//! sections (`[design]`, `[costs]`) mirror the structs defined in the submodules.
use crate::error::{is_non_negative, is_positive};
use crate::input::{input_err_msg, read_toml};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod costs;
pub use costs::CostRates;
pub mod design;
pub use design::DesignParameters;

const DEFAULT_PARAMETERS_FILE_HEADER: &str =
    "# Engineering and cost parameters for rooftop rainwater harvesting assessments.
# Any value omitted from this file takes its default value.
";

/// Engineering and cost tables for an assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Tables used to size the system
    pub design: DesignParameters,
    /// Unit rates used to cost the system and value its benefits
    pub costs: CostRates,
}

impl Parameters {
    /// Read a parameters file from the specified path.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to the parameters TOML file
    ///
    /// # Returns
    ///
    /// The file contents as a [`Parameters`] struct or an error if the file is invalid
    pub fn from_path(file_path: &Path) -> Result<Parameters> {
        let parameters: Parameters = read_toml(file_path)?;
        parameters
            .validate()
            .with_context(|| input_err_msg(file_path))?;

        Ok(parameters)
    }

    /// Validate parameters after reading in file
    pub fn validate(&self) -> Result<()> {
        self.design
            .validate()
            .context("Invalid design parameters")?;
        self.costs.validate().context("Invalid cost rates")?;

        Ok(())
    }

    /// The contents of a parameters file containing all of the default values
    pub fn default_file_contents() -> String {
        let parameters = toml::to_string(&Parameters::default())
            .expect("Could not convert parameters to TOML");

        format!("{DEFAULT_PARAMETERS_FILE_HEADER}\n{parameters}")
    }
}

/// Check that a parameter is finite and greater than zero
pub(crate) fn check_positive(value: f64, name: &str) -> Result<()> {
    ensure!(
        is_positive(value),
        "{name} must be a finite number greater than zero"
    );

    Ok(())
}

/// Check that a parameter is finite and not negative
pub(crate) fn check_non_negative(value: f64, name: &str) -> Result<()> {
    ensure!(
        is_non_negative(value),
        "{name} must be a finite number of at least zero"
    );

    Ok(())
}
