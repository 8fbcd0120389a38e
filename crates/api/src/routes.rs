pub mod admin;
pub mod auth;
pub mod booking;
pub mod court;
pub mod health;
pub mod time_slot;
pub mod venue;
