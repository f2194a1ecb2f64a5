pub mod conflict;
pub mod price;
pub mod range;
