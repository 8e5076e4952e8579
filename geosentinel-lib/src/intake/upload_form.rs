use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use geosentinel_proto::{IMAGE_FIELD_PREFIX, METADATA_FIELD};
use serde_json::Value;
use thiserror::Error;

use super::ReceivedImage;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("No files provided")]
    NoFiles,
    #[error("Missing required metadata fields")]
    MissingMetadataFields,
    #[error("Upload metadata was not provided")]
    MetadataMissing,
    #[error(transparent)]
    InvalidMetadata(serde_json::Error),
    #[error("{0}")]
    UnreadableForm(String),
    #[error(transparent)]
    Multipart(#[from] MultipartError),
}

impl From<MultipartRejection> for IntakeError {
    fn from(rejection: MultipartRejection) -> Self {
        IntakeError::UnreadableForm(rejection.body_text())
    }
}

#[derive(Debug, Clone)]
pub struct UploadMetadata {
    pub aoi_name: String,
    pub analysis_type: String,
}

impl UploadMetadata {
    /// A `null` document means the client never sent a `metadata` field and
    /// fails as a 500; a document that merely lacks the fields is a 400.
    /// Non-string and empty values count as absent.
    pub fn from_value(value: &Value) -> Result<Self, IntakeError> {
        if value.is_null() {
            return Err(IntakeError::MetadataMissing);
        }
        match (field(value, "aoiName"), field(value, "analysisType")) {
            (Some(aoi_name), Some(analysis_type)) => Ok(Self {
                aoi_name,
                analysis_type,
            }),
            _ => Err(IntakeError::MissingMetadataFields),
        }
    }
}

fn field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Default)]
pub struct UploadForm {
    metadata: Option<String>,
    parts: HashMap<String, ReceivedImage>,
}

impl UploadForm {
    /// Drains the whole multipart body; file bytes are read for their size
    /// and dropped. For duplicate field names the first occurrence wins.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, IntakeError> {
        let mut form = UploadForm::default();
        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == METADATA_FIELD {
                let text = field.text().await?;
                if form.metadata.is_none() {
                    form.metadata = Some(text);
                }
            } else {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mut size: u64 = 0;
                while let Some(chunk) = field.chunk().await? {
                    size += chunk.len() as u64;
                }
                form.parts.entry(name.clone()).or_insert(ReceivedImage {
                    field_name: name,
                    file_name,
                    size,
                });
            }
        }
        Ok(form)
    }

    /// The contiguous `image_0..image_N` run; parts after a gap are ignored.
    pub fn image_sequence(&self) -> Vec<&ReceivedImage> {
        let mut files = Vec::new();
        let mut index = 0;
        while let Some(image) = self.parts.get(&format!("{}{}", IMAGE_FIELD_PREFIX, index)) {
            files.push(image);
            index += 1;
        }
        files
    }

    /// An absent `metadata` field parses as JSON `null`; whether that is
    /// acceptable is decided after the file sequence has been checked.
    pub fn parse_metadata(&self) -> Result<Value, IntakeError> {
        match &self.metadata {
            Some(text) => serde_json::from_str(text).map_err(IntakeError::InvalidMetadata),
            None => Ok(Value::Null),
        }
    }
}
