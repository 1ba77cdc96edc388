pub mod auth;
pub mod property;
pub mod rates;
pub mod reminders;
