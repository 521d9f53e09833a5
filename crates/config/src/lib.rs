// Configuration loading

pub mod calendar;
pub mod settings;

pub use calendar::{Calendar, CalendarPeriod};
pub use settings::{Settings, SettingsError};
