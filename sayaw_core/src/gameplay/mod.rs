pub mod performance;
pub mod reporter;
pub mod resolver;
