//! ID prefix constants.
//!
//! IDs are generated by the storage layer as `{prefix}-{8 hex chars}`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_TICKET: &str = "tkt";
pub const PREFIX_COMMENT: &str = "cmt";

pub const ALL_PREFIXES: [&str; 3] = [PREFIX_USER, PREFIX_TICKET, PREFIX_COMMENT];
