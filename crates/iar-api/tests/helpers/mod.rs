//! Test helpers: build AppState and router for integration tests.
//!
//! The router is the production one; only the repository is replaced by an in-memory
//! double, so no database is needed.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use iar_api::setup::routes;
use iar_api::state::AppState;
use iar_core::{AppError, BaseConfig, Config, DatabaseConfig, NormalizedRecord};
use iar_db::IarRepository;
use std::sync::{Arc, Mutex};

/// In-memory destination. A failing insert stores nothing, like a rolled-back batch.
#[derive(Clone, Default)]
pub struct MockIarRepository {
    rows: Arc<Mutex<Vec<NormalizedRecord>>>,
    insert_calls: Arc<Mutex<usize>>,
    ping_error: Option<String>,
    insert_error: Option<String>,
}

impl MockIarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable(message: &str) -> Self {
        Self {
            ping_error: Some(message.to_string()),
            insert_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn rejecting_inserts(message: &str) -> Self {
        Self {
            insert_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<NormalizedRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        *self.insert_calls.lock().unwrap()
    }
}

#[async_trait]
impl IarRepository for MockIarRepository {
    async fn ping(&self) -> Result<(), AppError> {
        match &self.ping_error {
            Some(message) => Err(AppError::Internal(message.clone())),
            None => Ok(()),
        }
    }

    async fn bulk_insert(&self, records: &[NormalizedRecord]) -> Result<u64, AppError> {
        *self.insert_calls.lock().unwrap() += 1;
        if let Some(message) = &self.insert_error {
            return Err(AppError::Internal(message.clone()));
        }
        self.rows.lock().unwrap().extend_from_slice(records);
        Ok(records.len() as u64)
    }
}

/// Test application: server plus a handle on the in-memory destination.
pub struct TestApp {
    pub server: TestServer,
    pub repository: MockIarRepository,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(MockIarRepository::new())
}

pub fn setup_test_app_with(repository: MockIarRepository) -> TestApp {
    let config = create_test_config();
    let state = Arc::new(AppState::new(config.clone(), Arc::new(repository.clone())));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, repository }
}

fn create_test_config() -> Config {
    Config {
        base: BaseConfig {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            max_upload_size_bytes: 1024 * 1024,
            http_concurrency_limit: 64,
            environment: "test".to_string(),
        },
        database: DatabaseConfig {
            host: "localhost".to_string(),
            instance_name: None,
            port: 5432,
            database: "iar_test".to_string(),
            user: "iar".to_string(),
            password: String::new(),
            encrypt: false,
            trust_server_certificate: true,
            table: "iar_2025_monitoring".to_string(),
            max_connections: 1,
            timeout_seconds: 1,
        },
    }
}

/// Multipart form carrying `contents` as a CSV file in the `file` field.
pub fn csv_form(file_name: &str, contents: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(contents.as_bytes().to_vec()))
        .file_name(file_name.to_string())
        .mime_type("text/csv");
    MultipartForm::new().add_part("file", part)
}
