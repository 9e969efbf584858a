//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Return tagged `ServiceResponse` envelopes instead of raw errors.
//! - Keep CLI/transport layers decoupled from storage details.

pub mod client_service;
pub mod dto;
pub mod project_service;
pub mod response;
mod use_case;

pub use use_case::RequestContext;
