pub mod auth;
pub mod property_service;
pub mod rate_service;
pub mod reminder_service;
