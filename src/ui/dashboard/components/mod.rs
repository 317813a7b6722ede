//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod confirm;
pub mod devices;
pub mod footer;
pub mod form;
pub mod header;
pub mod logs;
pub mod notification;
