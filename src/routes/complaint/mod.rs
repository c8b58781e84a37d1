mod handler;
mod model;

pub use handler::{create, list, rate, update_status};
