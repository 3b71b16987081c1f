//! gvisor-ext CLI - compile and render the gVisor runtime charts.

pub mod commands;
pub mod output;
