mod completion_service;
mod session_repository;

pub use completion_service::*;
pub use session_repository::*;
