//! `GET /`

use axum::Json;
use lsa_core::{ServiceDescriptor, VERSION};

pub async fn index() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::new(VERSION))
}
