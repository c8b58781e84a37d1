pub mod announcement;
pub mod complaint;
pub mod contact;
pub mod document;
pub mod event;
pub mod gallery;
pub mod user;
