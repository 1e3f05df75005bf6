use std::fmt::{Display, Formatter};

use crate::{
    core::{
        branch_and_bound::BranchAndBound,
        calendar::Calendar,
        error::{DispatchError, FastError, FastInfeasibility},
        fast::Fast,
        problem::Problem,
        solution::{Solution, Statistics},
    },
    prelude::*,
    quantity::cost::Cost,
};

/// Which scheduler, or schedulers, to run.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    clap::ValueEnum,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Fast scheduler, falling back to branch-and-bound when it gives up.
    #[default]
    Auto,

    /// Fast scheduler only.
    Fast,

    /// Branch-and-bound only.
    Exact,

    /// Fast scheduler for comparison, and then branch-and-bound for the result.
    Both,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Algorithm {
    Fast,
    BranchAndBound,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::BranchAndBound => write!(f, "branch-and-bound"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Solved { total_cost: Cost, statistics: Option<Statistics> },

    /// The fast scheduler was not applicable.
    Rejected(FastInfeasibility),
}

/// Report of a single scheduler invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub algorithm: Algorithm,
    pub outcome: RunOutcome,
}

#[derive(Debug)]
#[must_use]
pub struct Dispatched {
    /// Scheduler that produced the solution.
    pub algorithm: Algorithm,

    pub solution: Solution,

    /// Every scheduler invocation, in the order of execution.
    pub runs: Vec<Run>,
}

#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Dispatcher {
    #[builder(default)]
    strategy: Strategy,

    #[builder(default)]
    collect_statistics: bool,
}

impl Dispatcher {
    #[instrument(skip_all, fields(strategy = ?self.strategy, n_devices = problem.devices.len()))]
    pub fn dispatch(
        &self,
        problem: &Problem,
        calendar: &Calendar,
    ) -> Result<Dispatched, DispatchError> {
        let mut runs = Vec::new();
        match self.strategy {
            Strategy::Fast => {
                let solution = self.run_fast(problem, calendar, &mut runs)?;
                Ok(Dispatched { algorithm: Algorithm::Fast, solution, runs })
            }
            Strategy::Exact => self.run_exact(problem, calendar, runs),
            Strategy::Auto => match self.run_fast(problem, calendar, &mut runs) {
                Ok(solution) => Ok(Dispatched { algorithm: Algorithm::Fast, solution, runs }),
                Err(FastError::Infeasible(reason)) => {
                    warn!(%reason, "falling back to branch-and-bound…");
                    self.run_exact(problem, calendar, runs)
                }
                Err(FastError::Configuration(error)) => Err(error.into()),
            },
            Strategy::Both => {
                match self.run_fast(problem, calendar, &mut runs) {
                    Ok(_) | Err(FastError::Infeasible(_)) => {}
                    Err(FastError::Configuration(error)) => return Err(error.into()),
                }
                self.run_exact(problem, calendar, runs)
            }
        }
    }

    fn run_fast(
        &self,
        problem: &Problem,
        calendar: &Calendar,
        runs: &mut Vec<Run>,
    ) -> Result<Solution, FastError> {
        let result = Fast::builder()
            .devices(&problem.devices)
            .tariff(&problem.tariff)
            .calendar(calendar)
            .max_power(problem.max_power)
            .collect_statistics(self.collect_statistics)
            .build()
            .solve();
        let outcome = match &result {
            Ok(solution) => Some(RunOutcome::Solved {
                total_cost: solution.schedule.total_cost,
                statistics: solution.statistics,
            }),
            Err(FastError::Infeasible(reason)) => {
                info!(%reason, "the fast scheduler is not applicable");
                Some(RunOutcome::Rejected(reason.clone()))
            }
            Err(FastError::Configuration(_)) => None,
        };
        if let Some(outcome) = outcome {
            runs.push(Run { algorithm: Algorithm::Fast, outcome });
        }
        result
    }

    fn run_exact(
        &self,
        problem: &Problem,
        calendar: &Calendar,
        mut runs: Vec<Run>,
    ) -> Result<Dispatched, DispatchError> {
        let solution = BranchAndBound::builder()
            .devices(&problem.devices)
            .tariff(&problem.tariff)
            .calendar(calendar)
            .max_power(problem.max_power)
            .collect_statistics(self.collect_statistics)
            .build()?
            .solve()?;
        runs.push(Run {
            algorithm: Algorithm::BranchAndBound,
            outcome: RunOutcome::Solved {
                total_cost: solution.schedule.total_cost,
                statistics: solution.statistics,
            },
        });
        Ok(Dispatched { algorithm: Algorithm::BranchAndBound, solution, runs })
    }
}
