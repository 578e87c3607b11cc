// Domain layer - Series model and the pure derivation steps
pub mod advisory;
pub mod dashboard;
pub mod derived;
pub mod normalizer;
pub mod statistics;
pub mod telemetry;
