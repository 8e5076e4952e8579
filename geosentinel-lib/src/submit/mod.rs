mod submit_file;
mod submit_session;

pub use submit_file::*;
pub use submit_session::*;
