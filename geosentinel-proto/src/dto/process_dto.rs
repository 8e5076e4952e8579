use serde::{Deserialize, Serialize};

use crate::POST_ONLY_MESSAGE;

use super::JobDto;

/// 200
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessAcceptedDto {
    pub success: bool,
    pub message: String,
    pub data: JobDto,
}

impl ProcessAcceptedDto {
    pub fn new(message: impl ToString, data: JobDto) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
        }
    }
}

/// 400/500, no `data` key
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessRejectedDto {
    pub success: bool,
    pub message: String,
}

impl ProcessRejectedDto {
    pub fn new(message: impl ToString) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// 405
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodNotAllowedDto {
    pub message: String,
}

impl Default for MethodNotAllowedDto {
    fn default() -> Self {
        Self {
            message: POST_ONLY_MESSAGE.to_owned(),
        }
    }
}
