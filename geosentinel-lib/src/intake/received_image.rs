/// One uploaded file part; the bytes are drained during collection and only
/// the name and size survive for logging.
#[derive(Debug, Clone)]
pub struct ReceivedImage {
    pub field_name: String,
    pub file_name: String,
    pub size: u64,
}
