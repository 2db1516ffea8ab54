pub mod users;

pub use users::{User, UserRepo};
