pub mod change;
pub mod message;
