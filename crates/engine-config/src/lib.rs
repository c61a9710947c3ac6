pub mod env;
pub mod report;
pub mod settings;
