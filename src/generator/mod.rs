pub mod engine;
pub mod report;
pub mod template;
pub mod triggers;
