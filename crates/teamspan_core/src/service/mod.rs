//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate source loading, aggregation and ranking into one call.
//! - Keep the CLI decoupled from pipeline details.

pub mod collaboration_service;
