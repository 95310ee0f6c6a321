// Application layer - Use cases and the ports they depend on
pub mod case_repository;
pub mod chart_request;
pub mod chart_service;
pub mod jurisdiction_directory;
pub mod scatter_service;
