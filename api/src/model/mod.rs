pub mod admin;
pub mod auth;
pub mod notice;
pub mod reservation;
pub mod space;
