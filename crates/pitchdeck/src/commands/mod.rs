pub mod chart;
pub mod completion;
pub mod config;
