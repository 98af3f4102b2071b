// User registration and lookup.

pub mod handlers;
pub mod registration;
