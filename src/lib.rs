//! Feasibility assessment of rooftop rainwater harvesting systems.
//!
//! A project describes a building, its occupants and the local climate and groundwater. From
//! this, [`design`] sizes the storage tank, gutters, first-flush device, filter and recharge
//! structure, [`costs`] prices them and [`economics`] weighs the cost against the value of the
//! water and energy saved. [`assessment`] ties the stages together.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod assessment;
pub mod cli;
pub mod costs;
pub mod design;
pub mod economics;
pub mod error;
pub mod finance;
pub mod input;
pub mod log;
pub mod lookup;
pub mod output;
pub mod parameters;
pub mod project;
pub mod settings;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the config folder for the program.
///
/// Falls back to the current directory if the platform has no config folder.
pub fn get_rtrwh_config_dir() -> PathBuf {
    let Some(mut dir) = dirs::config_dir() else {
        return PathBuf::new();
    };
    dir.push("rtrwh");

    dir
}
