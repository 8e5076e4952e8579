use axum::{http::StatusCode, response::IntoResponse, Json};
use geosentinel_proto::dto::ProcessRejectedDto;

use crate::{error::Error, intake::IntakeError};

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Intake(e) => e.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntakeError {
    fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::NoFiles | IntakeError::MissingMetadataFields => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::Intake(e) => e.into_response(),
            _ => {
                log::error!("Error processing images: {}", self);
                (
                    self.status_code(),
                    Json(ProcessRejectedDto::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Error processing images: {}", self);
        }
        (status, Json(ProcessRejectedDto::new(self.to_string()))).into_response()
    }
}
