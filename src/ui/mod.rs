//! Terminal output for readiness runs

pub mod report;
