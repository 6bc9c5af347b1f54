//! Shared fixtures: documents, multipart bodies, a stub Gemini endpoint.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path as UrlPath, Query, State},
    http::{header, Request},
    response::IntoResponse,
    routing::post,
    Router,
};
use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use resume_analyzer::config::{AiConfig, AiMode, Config, DEFAULT_MODEL};
use resume_analyzer::services::TextExtractor;
use serde_json::Value;
use tokio::net::TcpListener;

pub const BOUNDARY: &str = "resume-analyzer-test-boundary";

pub fn test_config(upload_dir: &Path, mode: AiMode, endpoint_base: &str) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        max_file_size_mb: 5,
        upload_dir: upload_dir.to_path_buf(),
        request_timeout_seconds: 30,
        ai: AiConfig {
            mode,
            model: DEFAULT_MODEL.to_string(),
            endpoint_base: endpoint_base.to_string(),
            timeout: Duration::from_secs(30),
        },
    }
}

pub fn live(key: &str) -> AiMode {
    AiMode::Live {
        api_key: key.to_string(),
    }
}

pub fn scratch_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok().map(|e| e.path())).collect())
        .unwrap_or_default()
}

/// Single-page PDF showing `text` in Courier.
pub fn pdf_bytes(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn packed(docx: Docx) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// One paragraph (single run) per entry.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    packed(docx)
}

/// A paragraph split over two runs, an empty paragraph, a table and a trailing paragraph.
pub fn mixed_docx_bytes() -> Vec<u8> {
    let table = Table::new(vec![TableRow::new(vec![TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("In a table")))])]);

    packed(
        Docx::new()
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Jane"))
                    .add_run(Run::new().add_text("-Doe")),
            )
            .add_paragraph(Paragraph::new())
            .add_table(table)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Rust developer"))),
    )
}

pub fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(file_name: &str, content: &[u8]) -> Request<Body> {
    multipart_request("resumeFile", file_name, content)
}

pub fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, file_name, content)))
        .unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// What the stub endpoint saw.
#[derive(Clone, Default)]
pub struct GeminiStub {
    pub hits: Arc<AtomicUsize>,
    pub last_key: Arc<Mutex<Option<String>>>,
    pub last_target: Arc<Mutex<Option<String>>>,
    pub last_body: Arc<Mutex<Option<Value>>>,
    pub content_type: Arc<Mutex<Option<String>>>,
    /// Entries in the watched directory at the moment the request arrived.
    pub files_at_hit: Arc<Mutex<Option<usize>>>,
    reply: Arc<String>,
    delay: Option<Duration>,
    watch_dir: Option<PathBuf>,
}

impl GeminiStub {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn generate_content(
    State(stub): State<GeminiStub>,
    UrlPath(target): UrlPath<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
    body: String,
) -> impl IntoResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    *stub.last_key.lock().unwrap() = query.get("key").cloned();
    *stub.last_target.lock().unwrap() = Some(target);
    *stub.last_body.lock().unwrap() = serde_json::from_str(&body).ok();
    *stub.content_type.lock().unwrap() = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if let Some(dir) = &stub.watch_dir {
        *stub.files_at_hit.lock().unwrap() = Some(scratch_entries(dir).len());
    }

    if let Some(delay) = stub.delay {
        tokio::time::sleep(delay).await;
    }

    (
        [(header::CONTENT_TYPE, "application/json")],
        stub.reply.as_str().to_string(),
    )
}

pub struct StubOptions {
    pub delay: Option<Duration>,
    pub watch_dir: Option<PathBuf>,
}

/// Serves `reply` for every generateContent call; returns the `/v1` base URL.
pub async fn spawn_gemini_stub(reply: &str) -> (String, GeminiStub) {
    spawn_gemini_stub_with(
        reply,
        StubOptions {
            delay: None,
            watch_dir: None,
        },
    )
    .await
}

pub async fn spawn_gemini_stub_with(reply: &str, options: StubOptions) -> (String, GeminiStub) {
    let stub = GeminiStub {
        reply: Arc::new(reply.to_string()),
        delay: options.delay,
        watch_dir: options.watch_dir,
        ..GeminiStub::default()
    };

    let app = Router::new()
        .route("/v1/models/*target", post(generate_content))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), stub)
}

/// A base URL nothing is listening on.
pub async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1", addr)
}

pub enum Behavior {
    Text(String),
    Fail(String),
    Panic,
}

/// Extractor double that records how often it was invoked.
pub struct CountingExtractor {
    pub calls: Arc<AtomicUsize>,
    behavior: Behavior,
}

impl CountingExtractor {
    pub fn new(behavior: Behavior) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                calls: Arc::clone(&calls),
                behavior,
            }),
            calls,
        )
    }
}

impl TextExtractor for CountingExtractor {
    fn extract_text(&self, _source: &Path) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Text(text) => Ok(text.clone()),
            Behavior::Fail(message) => Err(anyhow::anyhow!("{}", message)),
            Behavior::Panic => panic!("parser blew up"),
        }
    }
}
