pub mod connection;
pub mod entities;
pub mod repositories;

pub use repositories::SessionRepository;
