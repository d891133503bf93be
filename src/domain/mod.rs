// Domain layer - Experiment data and chart view models
pub mod chart;
pub mod experiment;
pub mod format;
