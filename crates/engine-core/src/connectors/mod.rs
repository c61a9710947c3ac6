pub mod destination;
pub mod sink;
pub mod source;
