//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate entity mutations and snapshot commits into use-case APIs.
//! - Keep CLI/render layers decoupled from storage details.

pub mod board_service;
