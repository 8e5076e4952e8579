mod error;
pub mod intake;
pub mod server;
mod settings;
pub mod submit;
pub mod util;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use error::*;
pub use settings::*;
