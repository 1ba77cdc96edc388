pub mod auth;
pub mod properties;
pub mod rates;
pub mod reminders;
