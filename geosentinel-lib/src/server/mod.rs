use std::{
    net::{Ipv4Addr, SocketAddrV4},
    sync::Arc,
};

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use geosentinel_proto::ApiRoute;
use tokio::net::TcpListener;

use crate::Settings;

use self::controller::*;

mod controller;
mod error;

/// The upload route answers every non-POST method itself with 405, and
/// accepts bodies of any size.
pub fn router(settings: Settings) -> Router {
    Router::new()
        .route(
            ApiRoute::ProcessImages.path(),
            post(process_images).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::disable())
        .with_state(Arc::new(settings))
}

pub async fn serve(listener: TcpListener, settings: Settings) -> std::io::Result<()> {
    axum::serve(listener, router(settings)).await
}

pub async fn start_api_server(port: u16, settings: Settings) -> std::io::Result<()> {
    let listener = TcpListener::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port)).await?;
    log::info!("Intake server listening on port {}", port);
    serve(listener, settings).await
}
