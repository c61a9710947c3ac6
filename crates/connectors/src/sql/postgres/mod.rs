pub mod adapter;
pub mod params;
pub mod query;
pub mod utils;
