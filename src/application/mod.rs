// Application layer - Use cases over the telemetry repository
pub mod dashboard_service;
pub mod error;
pub mod series_client;
pub mod telemetry_repository;

#[cfg(test)]
pub mod fakes;
