mod job_dto;
mod metadata_dto;
mod process_dto;

pub use job_dto::*;
pub use metadata_dto::*;
pub use process_dto::*;
