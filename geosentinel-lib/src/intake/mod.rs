mod received_image;
mod upload_form;

pub use received_image::*;
pub use upload_form::*;
