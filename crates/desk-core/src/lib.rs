//! # desk-core
//!
//! Core types for the helpdesk ticketing system.
//!
//! This crate holds everything the other crates agree on and nothing that
//! performs I/O:
//! - Entity structs (users, tickets, comments)
//! - Role, status, and priority enums
//! - Role capability predicates
//! - Request payloads and the pure validation layer
//! - The business error taxonomy and its HTTP-class status mapping
//! - Response envelopes

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod payloads;
pub mod responses;
pub mod roles;
pub mod validation;
