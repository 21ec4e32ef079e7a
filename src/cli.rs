//! The command line interface for assessing projects.
use crate::assessment::{Assessment, assess};
use crate::design::compute_design;
use crate::log;
use crate::output::metadata::write_metadata;
use crate::output::{DataWriter, create_output_directory, get_output_dir};
use crate::parameters::Parameters;
use crate::project::Project;
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// Assess the feasibility of rooftop rainwater harvesting.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// A TOML file overriding the default engineering and cost parameters
    #[arg(short, long)]
    pub parameters: Option<PathBuf>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Assess a project and write the results to disk.
    Run {
        /// Path to the project file.
        project_file: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Check that a project file and parameters are valid.
    Validate {
        /// Path to the project file.
        project_file: PathBuf,
        /// A TOML file overriding the default engineering and cost parameters
        #[arg(short, long)]
        parameters: Option<PathBuf>,
    },
    /// Manage example projects.
    Example {
        /// The available subcommands for managing example projects.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Manage program settings.
    Settings {
        /// The available subcommands for managing settings.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
    /// Write the default engineering and cost parameters to the console.
    DumpParameters,
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { project_file, opts } => handle_run_command(&project_file, &opts, None),
            Self::Validate {
                project_file,
                parameters,
            } => handle_validate_command(&project_file, parameters.as_deref(), None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
            Self::DumpParameters => {
                print!("{}", Parameters::default_file_contents());
                Ok(())
            }
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ rtrwh --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load the given parameters file, or the defaults if there isn't one
fn load_parameters(parameters_path: Option<&Path>) -> Result<Parameters> {
    let Some(path) = parameters_path else {
        return Ok(Parameters::default());
    };

    let parameters = Parameters::from_path(path).context("Failed to load parameters.")?;
    info!("Loaded parameters from {}", path.display());

    Ok(parameters)
}

/// Initialise the program logger unless this has already been done
fn init_logger(settings: &Settings, log_file_path: Option<&Path>) -> Result<()> {
    if log::is_logger_initialised() {
        return Ok(());
    }

    log::init(&settings.log_level, log_file_path).context("Failed to initialise logging.")
}

/// Report the main findings of an assessment to the log
fn log_assessment(assessment: &Assessment) {
    // Warnings are logged as the design is computed
    let design = &assessment.design;
    for recommendation in &design.recommendations {
        info!("Recommendation: {recommendation}");
    }

    info!(
        "{} L {} tank, {} filter, {}",
        design.tank_capacity,
        assessment.cost_breakdown.tank_material,
        design.filter_type,
        design.recharge_structure
    );

    let analysis = &assessment.economic_analysis;
    info!(
        "Capital cost {:.0}, B/C ratio {:.2}, payback {:.1} years",
        analysis.capital_cost.value(),
        analysis.bc_ratio.value(),
        analysis.payback_period.value()
    );
    info!(
        "{}: {}",
        assessment.viability.category, assessment.viability.recommendation
    );
    info!(
        "With subsidy: {}: {}",
        assessment.viability_with_subsidy.category,
        assessment.viability_with_subsidy.recommendation
    );
}

/// Handle the `run` command.
pub fn handle_run_command(
    project_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(project_path)?;
        &pathbuf
    };

    let allow_overwrite = opts.overwrite || settings.overwrite;
    let overwrite = create_output_directory(output_path, allow_overwrite).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_path.display()
        )
    })?;

    init_logger(&settings, Some(output_path))?;

    let project = Project::from_path(project_path).context("Failed to load project.")?;
    info!("Loaded project from {}", project_path.display());
    info!("Output folder: {}", output_path.display());

    // Only shown once the logger is up
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let parameters = load_parameters(opts.parameters.as_deref())?;
    let assessment = assess(&project, &parameters)?;
    log_assessment(&assessment);

    let mut writer = DataWriter::create(output_path)?;
    writer.write_assessment(&assessment)?;
    writer.flush()?;
    write_metadata(output_path, project_path, project.name.as_deref())?;
    info!("Assessment complete!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(
    project_path: &Path,
    parameters_path: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    // Load program settings, if not provided
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    // No log files for validation
    init_logger(&settings, None)?;

    let project = Project::from_path(project_path).context("Failed to validate project.")?;
    let parameters = load_parameters(parameters_path)?;
    compute_design(&project.site, &parameters.design).context("Failed to validate project.")?;
    info!("Validation successful!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_parameters_default() {
        assert_eq!(load_parameters(None).unwrap(), Parameters::default());
    }
}
