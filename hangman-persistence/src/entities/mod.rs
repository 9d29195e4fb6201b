pub mod prelude;
pub mod session_entries;
