use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{ESTIMATED_TIME, JOB_ID_PREFIX};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub job_id: String,
    pub status: JobStatus,
    pub estimated_time: String,
    pub files_processed: usize,
    pub analysis_type: String,
    pub aoi_name: String,
}

impl JobDto {
    pub fn accepted(
        files_processed: usize,
        analysis_type: impl ToString,
        aoi_name: impl ToString,
    ) -> Self {
        Self {
            job_id: job_id_now(),
            status: JobStatus::Processing,
            estimated_time: ESTIMATED_TIME.to_owned(),
            files_processed,
            analysis_type: analysis_type.to_string(),
            aoi_name: aoi_name.to_string(),
        }
    }
}

// `job_` + epoch milliseconds; two requests in the same millisecond collide
pub fn job_id_now() -> String {
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{}{}", JOB_ID_PREFIX, epoch_ms)
}
