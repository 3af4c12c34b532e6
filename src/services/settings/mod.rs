// Settings service module
// Loads and saves the layout settings file

mod service;

pub use service::{SettingsService, SETTINGS_FILE_NAME};
