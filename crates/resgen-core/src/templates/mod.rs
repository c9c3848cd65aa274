//! Template sets and their rendering
pub mod dir;
pub mod functions;
pub mod kind;
pub mod manager;

pub use dir::*;
pub use functions::PatternChild;
pub use kind::*;
pub use manager::*;
