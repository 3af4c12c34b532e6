// Session Layout Library
// Weekly session calendar layout: collision grouping, chip placement,
// overflow badges and a shared row grid

pub mod models;
pub mod services;
pub mod utils;

pub use models::layout::{Chip, DayLayout, OverflowBadge, WeekLayout};
pub use models::schedule::{Day, Schedule};
pub use models::session::{Session, SessionStatus};
pub use models::settings::LayoutSettings;
pub use models::time_window::TimeWindow;
pub use services::cache::LayoutCache;
pub use services::layout::LayoutEngine;
pub use services::payload::{parse_schedule, PayloadError, SchedulePayload};
