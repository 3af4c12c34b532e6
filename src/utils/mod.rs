pub mod collation;
pub mod date;
