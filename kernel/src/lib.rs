pub mod booking;
pub mod model;
pub mod repository;
