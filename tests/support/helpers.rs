// tests/support/helpers.rs
use super::mocks::{
    DummyTokenManager, InMemoryCategoryRepo, InMemoryCoverStorage, InMemoryUserRepo,
    InMemoryWorkflowStore, StepClock,
};
use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
    response::Response,
};
use image::{DynamicImage, ImageFormat, RgbImage};
use pressroom::application::{
    commands::post_versions::NewPostVersionCommand,
    ports::storage::CoverStorage,
    services::{ApplicationServices, ServiceDependencies},
    uploads::{CoverUpload, MIN_COVER_HEIGHT, MIN_COVER_WIDTH},
};
use pressroom::domain::{
    post::PostReadRepository,
    post_version::{PostVersionReadRepository, WorkflowStore},
};
use pressroom::infrastructure::util::DefaultSlugGenerator;
use pressroom::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::{io::Cursor, sync::Arc};

pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: Arc<InMemoryWorkflowStore>,
    pub covers: Arc<InMemoryCoverStorage>,
}

impl TestApp {
    pub fn new() -> Self {
        let covers = Arc::new(InMemoryCoverStorage::default());
        Self::build(Arc::clone(&covers) as Arc<dyn CoverStorage>, covers)
    }

    /// Same wiring, but covers go to `storage` instead of the recorder.
    pub fn with_cover_storage(storage: Arc<dyn CoverStorage>) -> Self {
        Self::build(storage, Arc::new(InMemoryCoverStorage::default()))
    }

    fn build(storage: Arc<dyn CoverStorage>, covers: Arc<InMemoryCoverStorage>) -> Self {
        let store = Arc::new(InMemoryWorkflowStore::new());
        let services = Arc::new(ApplicationServices::new(ServiceDependencies {
            users: Arc::new(InMemoryUserRepo),
            categories: Arc::new(InMemoryCategoryRepo),
            posts: Arc::clone(&store) as Arc<dyn PostReadRepository>,
            post_versions: Arc::clone(&store) as Arc<dyn PostVersionReadRepository>,
            workflow: Arc::clone(&store) as Arc<dyn WorkflowStore>,
            covers: storage,
            token_manager: Arc::new(DummyTokenManager),
            clock: Arc::new(StepClock::default()),
            slugger: Arc::new(DefaultSlugGenerator),
        }));
        Self {
            services,
            store,
            covers,
        }
    }

    pub fn router(&self) -> Router {
        build_router(
            HttpState {
                services: Arc::clone(&self.services),
            },
            RouterOptions::default(),
        )
    }
}

pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut out, format)
        .expect("encode test image");
    out.into_inner()
}

pub fn png_bytes() -> Vec<u8> {
    image_bytes(MIN_COVER_WIDTH, MIN_COVER_HEIGHT, ImageFormat::Png)
}

pub fn cover_upload() -> CoverUpload {
    CoverUpload::new(Some("cover.png".into()), png_bytes())
}

pub fn new_command(title: &str) -> NewPostVersionCommand {
    NewPostVersionCommand::builder()
        .category_id(1)
        .title(title)
        .description("A short description")
        .content("Body of the article")
        .cover(cover_upload())
        .build()
        .expect("complete command")
}

pub const BOUNDARY: &str = "pressroom-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

pub fn full_form(title: &str) -> MultipartBody {
    MultipartBody::new()
        .text("category_id", "1")
        .text("title", title)
        .text("description", "A short description")
        .text("content", "Body of the article")
        .file("cover", "cover.png", "image/png", &png_bytes())
}

pub fn multipart_request(method: &str, uri: &str, token: &str, form: MultipartBody) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.finish()))
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, token: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert an `ErrorResponse` body with the given status; returns the body.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode) -> Value {
    assert_eq!(resp.status(), expected_status);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content-type: {content_type}"
    );
    let json = read_json(resp).await;
    assert_eq!(
        json["error"].as_str(),
        expected_status.canonical_reason(),
        "unexpected error field: {json}"
    );
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected a non-empty message: {json}"
    );
    json
}
