//! Scheduling core: pure computation over validated input, no I/O.

pub mod branch_and_bound;
pub mod calendar;
pub mod device;
pub mod dispatcher;
pub mod error;
pub mod fast;
pub mod hour;
pub mod hourly;
pub mod ordering;
pub mod pricing;
pub mod problem;
pub mod solution;
pub mod tariff;
