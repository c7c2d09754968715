//! Core use-case services.
//!
//! # Responsibility
//! - Compose name parsing and visitor persistence into use-case APIs.
//! - Keep CLI/API layers decoupled from storage details.

pub mod visitor_service;
