pub mod batch;
pub mod range;
pub mod record;
pub mod row;
