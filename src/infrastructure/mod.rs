// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod flux;
pub mod influx_repository;
