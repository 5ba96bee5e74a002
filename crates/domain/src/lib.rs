pub mod errors;
pub mod service;
pub mod todo;

pub use errors::*;
pub use service::*;
pub use todo::*;
