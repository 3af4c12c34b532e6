// Service module exports

pub mod cache;
pub mod layout;
pub mod palette;
pub mod payload;
pub mod settings;
