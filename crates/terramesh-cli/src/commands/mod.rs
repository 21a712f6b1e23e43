//! CLI command implementations

pub mod config;
pub mod export;
pub mod inspect;

use clap::ValueEnum;

/// How command results are printed
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
