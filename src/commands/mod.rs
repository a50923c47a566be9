//! CLI commands for readiness-gate
//!
//! - **run**: run every registered check and gate on the verdict
//! - **list**: show the registered checks without running them

pub mod list;
pub mod run;

pub use list::run_list;
pub use run::run_gate;
