#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod input;
mod output;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::Args,
    core::{calendar::Calendar, dispatcher::Dispatcher},
    input::InputDocument,
    output::OutputDocument,
    prelude::*,
    tables::{build_devices_table, build_hourly_table, build_runs_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let problem = InputDocument::read_from(&args.input)?.into_problem()?;
    let calendar = Calendar::new();

    let dispatched = Dispatcher::builder()
        .strategy(args.strategy)
        .collect_statistics(args.statistics)
        .build()
        .dispatch(&problem, &calendar)
        .context("failed to schedule the devices")?;
    info!(
        algorithm = %dispatched.algorithm,
        total_cost = %dispatched.solution.schedule.total_cost,
        "scheduled",
    );

    let schedule = &dispatched.solution.schedule;
    println!("{}", build_hourly_table(schedule));
    println!("{}", build_devices_table(schedule));
    if args.statistics {
        println!("{}", build_runs_table(&dispatched.runs));
    }

    OutputDocument::new(schedule, args.precision).write_to(&args.output)?;
    Ok(())
}
