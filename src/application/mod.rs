// Application layer - Use cases and derived-data pipeline
pub mod aggregator;
pub mod dashboard_service;
pub mod dataset_repository;
pub mod error;
pub mod series_builder;
pub mod view_state;
