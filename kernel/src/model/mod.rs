pub mod availability;
pub mod calendar;
pub mod clock;
pub mod id;
pub mod pricing;
pub mod reservation;
pub mod role;
pub mod selection;
pub mod session;
pub mod slot;
pub mod space;
pub mod user;
