use std::cmp::min;

use futures_util::StreamExt;
use geosentinel_proto::{
    dto::{JobDto, ProcessAcceptedDto, ProcessRejectedDto, UploadMetadataDto},
    ApiRoute, IMAGE_FIELD_PREFIX, METADATA_FIELD,
};
use once_cell::sync::Lazy;
use reqwest::{multipart, Body, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tokio::{fs::File, sync::mpsc::Sender};
use tokio_util::io::ReaderStream;

use crate::{ClientSettings, Result};

use super::{SubmitFile, SubmitFiles};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    reqwest::ClientBuilder::new()
        .build()
        .expect("Failed to create reqwest client")
});

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("No images selected")]
    NothingSelected,
    #[error("{0} is not a supported image format")]
    UnsupportedFormat(String),
    #[error("{file_name} is too large: {size} bytes (limit {limit})")]
    FileTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },
    #[error("{0}")]
    Rejected(String), // message from the server's rejection envelope
    #[error("Unknown response status code: {0}")]
    Unknown(StatusCode),
}

#[derive(Debug)]
pub struct UploadProgress {
    pub file_index: usize,
    pub position: u64,
    pub finish: bool,
}

#[derive(Debug)]
pub struct SubmitSession {
    settings: ClientSettings,
    metadata: UploadMetadataDto,
    files: SubmitFiles,
}

impl SubmitSession {
    pub fn new(settings: ClientSettings, metadata: UploadMetadataDto, files: SubmitFiles) -> Self {
        Self {
            settings,
            metadata,
            files,
        }
    }

    /// Streams the whole set as one multipart request, reporting per-file
    /// byte positions on `progress_tx` while the body uploads.
    pub async fn upload(self, progress_tx: Sender<UploadProgress>) -> Result<JobDto> {
        if self.files.is_empty() {
            return Err(SubmitError::NothingSelected)?;
        }

        let mut form = multipart::Form::new().text(
            METADATA_FIELD,
            serde_json::to_string(&self.metadata)?,
        );
        for file in &self.files.files {
            form = form.part(
                format!("{}{}", IMAGE_FIELD_PREFIX, file.index),
                Self::file_part(file, progress_tx.clone()).await?,
            );
        }

        let response = CLIENT
            .post(ApiRoute::ProcessImages.target(&self.settings.base_url))
            .multipart(form)
            .timeout(self.settings.timeout)
            .send()
            .await?;
        match response.status() {
            // 200
            StatusCode::OK => {
                let dto = response.json::<ProcessAcceptedDto>().await?;
                Ok(dto.data)
            }
            // 400/500 carry the rejection envelope when the server built it
            status => match response.json::<ProcessRejectedDto>().await {
                Ok(rejection) => Err(SubmitError::Rejected(rejection.message))?,
                Err(_) => Err(SubmitError::Unknown(status))?,
            },
        }
    }

    async fn file_part(
        file: &SubmitFile,
        progress_tx: Sender<UploadProgress>,
    ) -> Result<multipart::Part> {
        let file_index = file.index;
        let file_size = file.size;
        let handle = File::open(&file.path).await?;
        let mut reader_stream = ReaderStream::new(handle);
        let mut uploaded = 0;

        let async_stream = async_stream::stream! {
            while let Some(chunk) = reader_stream.next().await {
                if let Ok(chunk) = &chunk {
                    let pos = min(uploaded + (chunk.len() as u64), file_size);
                    uploaded = pos;
                    let progress = UploadProgress {
                        file_index,
                        position: pos,
                        finish: pos >= file_size,
                    };
                    progress_tx.send(progress).await.ok();
                }
                yield chunk;
            }
        };

        let content_type = mime_guess::from_path(&file.file_name)
            .first_or_octet_stream()
            .to_string();
        let part = multipart::Part::stream_with_length(Body::wrap_stream(async_stream), file_size)
            .file_name(file.file_name.clone())
            .mime_str(&content_type)?;
        Ok(part)
    }

    pub async fn processing_status(settings: &ClientSettings, job_id: &str) -> Result<Value> {
        let url = format!("{}/{}", ApiRoute::JobStatus.target(&settings.base_url), job_id);
        Self::fetch_json(url, &[], settings).await
    }

    pub async fn analysis_history(settings: &ClientSettings, aoi_id: Option<&str>) -> Result<Value> {
        let url = ApiRoute::History.target(&settings.base_url);
        let query: Vec<(&str, &str)> = aoi_id.map(|id| ("aoi_id", id)).into_iter().collect();
        Self::fetch_json(url, &query, settings).await
    }

    async fn fetch_json(url: String, query: &[(&str, &str)], settings: &ClientSettings) -> Result<Value> {
        let mut request = CLIENT.get(url).timeout(settings.timeout);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => match response.json::<ProcessRejectedDto>().await {
                Ok(rejection) => Err(SubmitError::Rejected(rejection.message))?,
                Err(_) => Err(SubmitError::Unknown(status))?,
            },
        }
    }
}
