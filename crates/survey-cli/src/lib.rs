//! CLI library components for Survey Studio.

pub mod logging;
pub mod script;
pub mod settings;
pub mod summary;
