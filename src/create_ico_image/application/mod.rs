pub mod config;
pub mod container_builder;
pub mod error;
pub mod ico_service;
pub mod resolution_set;
