pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

pub const PROCESSING_DELAY_MS: u64 = 2000;
pub const REQUEST_TIMEOUT_MS: u64 = 300_000;

pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024; // client-side only

pub const METADATA_FIELD: &'static str = "metadata";
pub const IMAGE_FIELD_PREFIX: &'static str = "image_";

pub const JOB_ID_PREFIX: &'static str = "job_";
pub const ESTIMATED_TIME: &'static str = "5-10 minutes";

pub const SUBMITTED_MESSAGE: &'static str = "Images submitted for processing successfully";
pub const POST_ONLY_MESSAGE: &'static str = "This endpoint only accepts POST requests";
