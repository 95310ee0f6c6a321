// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod json_mapper;
pub mod jurisdiction_catalog;
pub mod memory_repository;
