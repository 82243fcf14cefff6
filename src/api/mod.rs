//! The users API: handlers and route registration.

mod users;

pub use users::{create_user, get_user, list_users, register_routes, CreatedUser};
