pub mod connection;
pub mod dao;
pub mod entities;
pub mod repository;

pub use repository::{NewTodo, TodoRepository};

pub type Todo = entities::todo::Model;
