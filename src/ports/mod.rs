//! Port traits at the boundary between the briefing domain and the outside world.

pub mod config_port;
pub mod quote_port;
pub mod report_port;
