mod analysis;
mod constants;
mod image;
mod route;

pub mod dto;
pub use analysis::*;
pub use constants::*;
pub use image::*;
pub use route::*;
