// Module exports for models
// Input records, the time window and the computed layout

pub mod layout;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod time_window;
