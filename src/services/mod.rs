// Service exports
pub mod backend;
pub mod session;

pub use backend::{DataSource, HttpDataSource, TransportError};
pub use session::ViewSession;
