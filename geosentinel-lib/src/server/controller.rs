use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::StatusCode,
    Json,
};
use geosentinel_proto::{
    dto::{JobDto, MethodNotAllowedDto, ProcessAcceptedDto},
    SUBMITTED_MESSAGE,
};

use crate::{
    intake::{IntakeError, UploadForm, UploadMetadata},
    Result, Settings,
};

// The metadata JSON is parsed before the file-sequence check; its required
// fields are validated only after it.
pub async fn process_images(
    State(settings): State<Arc<Settings>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessAcceptedDto>> {
    let multipart = multipart.map_err(IntakeError::from)?;
    let form = UploadForm::from_multipart(multipart).await?;
    let metadata = form.parse_metadata()?;

    let files = form.image_sequence();
    if files.is_empty() {
        return Err(IntakeError::NoFiles)?;
    }
    let fields = UploadMetadata::from_value(&metadata)?;

    log::info!(
        "Processing images: {} file(s), metadata: {}",
        files.len(),
        metadata
    );
    for file in &files {
        log::info!("  {}: {} ({} bytes)", file.field_name, file.file_name, file.size);
    }

    // TODO: hand the sequence to the actual change-detection pipeline.
    // Until that exists a fixed delay stands in for the processing time.
    tokio::time::sleep(settings.processing_delay).await;

    let job = JobDto::accepted(files.len(), &fields.analysis_type, &fields.aoi_name);
    Ok(Json(ProcessAcceptedDto::new(SUBMITTED_MESSAGE, job)))
}

pub async fn method_not_allowed() -> (StatusCode, Json<MethodNotAllowedDto>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodNotAllowedDto::default()),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{server::router, Settings};

    const BOUNDARY: &str = "geosentinel-test-boundary";
    const ROUTE: &str = "/api/process-images";
    const METADATA: &str = r#"{"aoiName":"Delta North","analysisType":"vegetation"}"#;

    fn quick_router() -> Router {
        router(Settings {
            processing_delay: Duration::ZERO,
        })
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/tiff\r\n\r\n",
                    name, file_name
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn upload_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(ROUTE)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn accepts_a_valid_upload() {
        let (status, body) = call(
            quick_router(),
            upload_request(&[
                ("metadata", None, METADATA),
                ("image_0", Some("before.tif"), "before-bytes"),
                ("image_1", Some("after.tif"), "after-bytes"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(
            body["message"],
            "Images submitted for processing successfully"
        );
        let data = &body["data"];
        assert_eq!(data["status"], "processing");
        assert_eq!(data["estimatedTime"], "5-10 minutes");
        assert_eq!(data["filesProcessed"], 2);
        assert_eq!(data["analysisType"], "vegetation");
        assert_eq!(data["aoiName"], "Delta North");
        let suffix = data["jobId"]
            .as_str()
            .unwrap()
            .strip_prefix("job_")
            .unwrap()
            .to_string();
        assert!(!suffix.is_empty());
        assert!(suffix.bytes().all(|b| b.is_ascii_digit()));
    }

    #[tokio::test]
    async fn counts_only_the_contiguous_run() {
        // image_2 is orphaned by the missing image_1 and silently dropped
        let (status, body) = call(
            quick_router(),
            upload_request(&[
                ("metadata", None, METADATA),
                ("image_0", Some("before.tif"), "bytes"),
                ("image_2", Some("orphan.tif"), "bytes"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["filesProcessed"], 1);
    }

    #[tokio::test]
    async fn zero_byte_files_still_count() {
        let (status, body) = call(
            quick_router(),
            upload_request(&[
                ("metadata", None, METADATA),
                ("image_0", Some("empty.tif"), ""),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["filesProcessed"], 1);
    }

    #[tokio::test]
    async fn rejects_an_upload_without_files() {
        let (status, body) = call(
            quick_router(),
            upload_request(&[("metadata", None, METADATA)]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No files provided");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn missing_files_outranks_missing_metadata() {
        // no metadata field either, but the file check comes first
        let (status, body) = call(quick_router(), upload_request(&[])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No files provided");
    }

    #[tokio::test]
    async fn rejects_incomplete_metadata() {
        for metadata in [
            r#"{"analysisType":"vegetation"}"#,
            r#"{"aoiName":"","analysisType":"vegetation"}"#,
            r#"{"aoiName":"Delta North"}"#,
            r#"{"aoiName":42,"analysisType":"vegetation"}"#,
        ] {
            let (status, body) = call(
                quick_router(),
                upload_request(&[
                    ("metadata", None, metadata),
                    ("image_0", Some("before.tif"), "bytes"),
                ]),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Missing required metadata fields");
        }
    }

    #[tokio::test]
    async fn absent_metadata_with_files_is_a_server_fault() {
        let (status, body) = call(
            quick_router(),
            upload_request(&[("image_0", Some("before.tif"), "bytes")]),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Upload metadata was not provided");
    }

    #[tokio::test]
    async fn surfaces_the_metadata_parse_error() {
        let (status, body) = call(
            quick_router(),
            upload_request(&[
                ("metadata", None, "{not json"),
                ("image_0", Some("before.tif"), "bytes"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(!body["message"].as_str().unwrap().is_empty());
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn metadata_parse_failure_outranks_missing_files() {
        // the JSON parse runs before the file check, so this is a 500
        let (status, body) = call(
            quick_router(),
            upload_request(&[("metadata", None, "{not json")]),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn rejects_a_non_multipart_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri(ROUTE)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"aoiName":"Delta North"}"#))
            .unwrap();
        let (status, body) = call(quick_router(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn first_duplicate_field_wins() {
        let (status, body) = call(
            quick_router(),
            upload_request(&[
                ("metadata", None, METADATA),
                ("metadata", None, "{broken"),
                ("image_0", Some("before.tif"), "bytes"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["aoiName"], "Delta North");
    }

    #[tokio::test]
    async fn answers_non_post_methods_with_405() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let request = Request::builder()
                .method(method)
                .uri(ROUTE)
                .body(Body::empty())
                .unwrap();
            let (status, body) = call(quick_router(), request).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                body,
                json!({ "message": "This endpoint only accepts POST requests" })
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn holds_the_response_for_the_processing_delay() {
        let started = tokio::time::Instant::now();
        let (status, _) = call(
            router(Settings::default()),
            upload_request(&[
                ("metadata", None, METADATA),
                ("image_0", Some("before.tif"), "bytes"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn job_ids_follow_the_clock() {
        let parts: &[(&str, Option<&str>, &str)] = &[
            ("metadata", None, METADATA),
            ("image_0", Some("before.tif"), "bytes"),
        ];
        let (_, first) = call(quick_router(), upload_request(parts)).await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        let (_, second) = call(quick_router(), upload_request(parts)).await;
        assert_ne!(first["data"]["jobId"], second["data"]["jobId"]);
    }
}
