mod handler;
mod model;

pub use handler::{change_password, list, set_active, update_profile, update_role};
