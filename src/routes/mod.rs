mod entry;
pub mod todos;

pub use entry::{app, router};
