pub mod connection;
pub mod reservations;

pub use connection::{init_db, Database};
