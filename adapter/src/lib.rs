pub mod http;
pub mod repository;
pub mod session;
