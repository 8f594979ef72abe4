pub mod components;
pub mod message;
