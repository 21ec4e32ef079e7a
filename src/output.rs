//! The module responsible for writing assessment results to disk.
use crate::assessment::Assessment;
use crate::costs::CostBreakdown;
use crate::design::DesignResult;
use crate::economics::{EconomicAnalysis, ViabilityAssessment};
use crate::finance::DiscountedCashFlow;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which project-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "rtrwh_results";

/// The output file name for the system design
const DESIGN_FILE_NAME: &str = "design.csv";

/// The output file name for warnings and recommendations
const ADVICE_FILE_NAME: &str = "advice.csv";

/// The output file name for the capital cost breakdown
const COST_BREAKDOWN_FILE_NAME: &str = "cost_breakdown.csv";

/// The output file name for the economic analysis
const ECONOMICS_FILE_NAME: &str = "economics.csv";

/// The output file name for the discounted cash flows
const CASH_FLOWS_FILE_NAME: &str = "cash_flows.csv";

/// Get the default output directory for the specified project file
pub fn get_output_dir(project_path: &Path) -> Result<PathBuf> {
    let project_name = project_path
        .file_stem()
        .context("Project file has no name")?
        .to_str()
        .context("Invalid chars in project file name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, project_name].iter().collect())
}

/// Create a new output directory, optionally replacing an existing one.
///
/// # Returns
///
/// Whether an existing, non-empty directory was overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if let Ok(mut entries) = fs::read_dir(output_dir) {
        if entries.next().is_none() {
            // Exists and is empty
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Please delete the folder or pass the \
             --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// A row of the design output file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct DesignRow {
    parameter: String,
    value: String,
    unit: String,
}

impl DesignRow {
    fn new(parameter: &str, value: impl ToString, unit: &str) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.to_string(),
            unit: unit.into(),
        }
    }
}

/// The design as a list of labelled values
fn design_rows(design: &DesignResult) -> Vec<DesignRow> {
    vec![
        DesignRow::new("Catchment area", design.catchment_area, "m²"),
        DesignRow::new("Water available", design.water_available, "L/yr"),
        DesignRow::new("Water required", design.water_required, "L/yr"),
        DesignRow::new("Feasible", design.is_feasible, ""),
        DesignRow::new("Tank capacity", design.tank_capacity, "L"),
        DesignRow::new("Tank diameter", design.tank_diameter, "m"),
        DesignRow::new("Tank height", design.tank_height, "m"),
        DesignRow::new("Peak flow", design.peak_flow, "L/s"),
        DesignRow::new("Gutter diameter", design.gutter_diameter, "mm"),
        DesignRow::new("Downpipe diameter", design.downpipe_diameter, "mm"),
        DesignRow::new("First flush volume", design.first_flush_volume, "L"),
        DesignRow::new("First flush pipe length", design.first_flush_pipe_length, "m"),
        DesignRow::new("Filter type", design.filter_type, ""),
        DesignRow::new("Filter area", design.filter_area, "m²"),
        DesignRow::new("Filter length", design.filter_length, "m"),
        DesignRow::new("Filter width", design.filter_width, "m"),
        DesignRow::new("Recharge structure", design.recharge_structure, ""),
        DesignRow::new("Recharge depth", design.recharge_depth, "m"),
        DesignRow::new("Recharge diameter", design.recharge_diameter, "m"),
    ]
}

/// A row of the advice output file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct AdviceRow {
    kind: String,
    message: String,
}

/// A row of the cost breakdown output file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct CostRow {
    component: String,
    cost: f64,
}

/// A row of the economics output file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct EconomicsRow {
    metric: String,
    value: String,
}

impl EconomicsRow {
    fn new(metric: &str, value: impl ToString) -> Self {
        Self {
            metric: metric.into(),
            value: value.to_string(),
        }
    }
}

/// The economic analysis and viability verdicts as a list of labelled values
fn economics_rows(
    analysis: &EconomicAnalysis,
    viability: &ViabilityAssessment,
    viability_with_subsidy: &ViabilityAssessment,
) -> Vec<EconomicsRow> {
    let annualised = &analysis.annualised_cost;
    vec![
        EconomicsRow::new("Capital cost", analysis.capital_cost),
        EconomicsRow::new("Annual maintenance cost", analysis.annual_maintenance_cost),
        EconomicsRow::new("Annual water savings", analysis.annual_water_savings),
        EconomicsRow::new("Annual energy savings", analysis.annual_energy_savings),
        EconomicsRow::new("Total annual benefits", analysis.total_annual_benefits),
        EconomicsRow::new("Interest loss", annualised.interest_loss),
        EconomicsRow::new("Maintenance and repair", annualised.maintenance_repair),
        EconomicsRow::new("Depreciation", annualised.depreciation),
        EconomicsRow::new("Miscellaneous", annualised.miscellaneous),
        EconomicsRow::new(
            "Annual cost of expenditure",
            analysis.annual_cost_of_expenditure,
        ),
        EconomicsRow::new("B/C ratio", analysis.bc_ratio),
        EconomicsRow::new("Payback period", analysis.payback_period),
        EconomicsRow::new("B/C ratio with subsidy", analysis.bc_ratio_with_subsidy),
        EconomicsRow::new(
            "Payback period with subsidy",
            analysis.payback_period_with_subsidy,
        ),
        EconomicsRow::new("Net present value", analysis.net_present_value),
        EconomicsRow::new("Viability", viability.category),
        EconomicsRow::new("Recommendation", viability.recommendation),
        EconomicsRow::new("Viability with subsidy", viability_with_subsidy.category),
        EconomicsRow::new(
            "Recommendation with subsidy",
            viability_with_subsidy.recommendation,
        ),
    ]
}

/// An object for writing assessment results to CSV files
pub struct DataWriter {
    design_writer: csv::Writer<File>,
    advice_writer: csv::Writer<File>,
    costs_writer: csv::Writer<File>,
    economics_writer: csv::Writer<File>,
    cash_flows_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        Ok(Self {
            design_writer: new_writer(DESIGN_FILE_NAME)?,
            advice_writer: new_writer(ADVICE_FILE_NAME)?,
            costs_writer: new_writer(COST_BREAKDOWN_FILE_NAME)?,
            economics_writer: new_writer(ECONOMICS_FILE_NAME)?,
            cash_flows_writer: new_writer(CASH_FLOWS_FILE_NAME)?,
        })
    }

    /// Write the design and its warnings and recommendations
    pub fn write_design(&mut self, design: &DesignResult) -> Result<()> {
        for row in design_rows(design) {
            self.design_writer.serialize(row)?;
        }

        let warnings = design.warnings.iter().map(|msg| ("warning", msg));
        let recommendations = design
            .recommendations
            .iter()
            .map(|msg| ("recommendation", msg));
        for (kind, message) in warnings.chain(recommendations) {
            self.advice_writer.serialize(AdviceRow {
                kind: kind.into(),
                message: message.clone(),
            })?;
        }

        Ok(())
    }

    /// Write the capital cost of each component
    pub fn write_cost_breakdown(&mut self, costs: &CostBreakdown) -> Result<()> {
        for (component, cost) in costs.components() {
            self.costs_writer.serialize(CostRow {
                component: component.into(),
                cost: cost.value(),
            })?;
        }

        Ok(())
    }

    /// Write the economic analysis and viability
    pub fn write_economics(
        &mut self,
        analysis: &EconomicAnalysis,
        viability: &ViabilityAssessment,
        viability_with_subsidy: &ViabilityAssessment,
    ) -> Result<()> {
        for row in economics_rows(analysis, viability, viability_with_subsidy) {
            self.economics_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write the discounted cash flow for each year
    pub fn write_cash_flows(&mut self, cash_flows: &[DiscountedCashFlow]) -> Result<()> {
        for flow in cash_flows {
            self.cash_flows_writer.serialize(flow)?;
        }

        Ok(())
    }

    /// Write all parts of an assessment
    pub fn write_assessment(&mut self, assessment: &Assessment) -> Result<()> {
        self.write_design(&assessment.design)?;
        self.write_cost_breakdown(&assessment.cost_breakdown)?;
        self.write_economics(
            &assessment.economic_analysis,
            &assessment.viability,
            &assessment.viability_with_subsidy,
        )?;
        self.write_cash_flows(&assessment.economic_analysis.cash_flows)?;

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.design_writer.flush()?;
        self.advice_writer.flush()?;
        self.costs_writer.flush()?;
        self.economics_writer.flush()?;
        self.cash_flows_writer.flush()?;

        Ok(())
    }
}
