mod handler;
mod model;

pub use handler::{create, delete, download, list, update};
