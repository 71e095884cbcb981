//! Application layer - Use cases orchestrating the domain
//!
//! This layer contains:
//! - Ports: Interfaces the application requires from external systems
//! - Services: Narrative backend, session dispatcher, character generation

pub mod ports;
pub mod services;
