pub mod auth;
pub mod availability;
pub mod pricing_rule;
pub mod reservation;
pub mod reservation_status;
pub mod space;
