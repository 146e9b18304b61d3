//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, codec and projection calls into use-case APIs.
//! - Keep UI/FFI/CLI layers decoupled from storage details.

pub mod journal_service;
