use std::time::Duration;

use geosentinel_proto::{DEFAULT_BASE_URL, MAX_FILE_SIZE, PROCESSING_DELAY_MS, REQUEST_TIMEOUT_MS};

const LARGE_LIMIT_BYTES: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Fixed pause before answering, standing in for the processing pipeline.
    pub processing_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(PROCESSING_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub max_file_size: u64, // preflight only, the server never checks sizes
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl ClientSettings {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.max_file_size > LARGE_LIMIT_BYTES {
            warnings.push(format!(
                "File size limit is very large: {} bytes",
                self.max_file_size
            ));
        }
        warnings
    }
}
