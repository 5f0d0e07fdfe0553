pub mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
