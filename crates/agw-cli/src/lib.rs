//! CLI library components for the feedback replay tool.

pub mod live;
pub mod logging;
pub mod report;
