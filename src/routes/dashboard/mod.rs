mod handler;
mod model;

pub use handler::{analytics, stats};
