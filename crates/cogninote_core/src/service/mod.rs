//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate tree-store mutations with snapshot persistence.
//! - Keep outer layers decoupled from storage details.

pub mod workspace_service;
