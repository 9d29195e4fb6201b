pub mod config;
pub mod console;
pub mod identity;
pub mod lookup;
pub mod ranking;
pub mod reporter;
