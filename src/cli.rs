use std::path::PathBuf;

use clap::Parser;

use crate::core::dispatcher::Strategy;

#[derive(Parser)]
#[command(author, version, about)]
#[must_use]
pub struct Args {
    /// Input document with the devices, the rates, and the power ceiling.
    #[clap(long, env = "WATTSLOT_INPUT", default_value = "input.json")]
    pub input: PathBuf,

    /// Where to save the schedule.
    #[clap(long, env = "WATTSLOT_OUTPUT", default_value = "output.json")]
    pub output: PathBuf,

    /// Scheduler selection.
    #[clap(
        long = "algorithm",
        env = "WATTSLOT_ALGORITHM",
        value_enum,
        default_value_t = Strategy::Auto
    )]
    pub strategy: Strategy,

    /// Collect and print run statistics.
    #[clap(long, env = "WATTSLOT_STATISTICS")]
    pub statistics: bool,

    /// Number of decimal places to round the output costs to.
    #[clap(long, env = "WATTSLOT_PRECISION", default_value = "8")]
    pub precision: u32,
}
