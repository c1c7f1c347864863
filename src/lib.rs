pub mod config;
pub mod dispatch;
pub mod error;
pub mod render;
pub mod schema;
pub mod session;

pub use config::*;
pub use dispatch::*;
pub use error::*;
pub use render::*;
pub use schema::*;
pub use session::*;
