//! Core domain types and logic.

pub mod briefing;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod quote;
pub mod report;
pub mod settings;
pub mod table;
pub mod universe;
