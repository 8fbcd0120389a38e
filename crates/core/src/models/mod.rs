pub mod booking;
pub mod common;
pub mod court;
pub mod time_format;
pub mod time_slot;
pub mod user;
pub mod venue;
