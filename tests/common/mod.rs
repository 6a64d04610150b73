#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use uuid::Uuid;

use notes_api::auth::{generate_jwt, Claims};
use notes_api::config::AppConfig;
use notes_api::database::MemoryNoteStore;
use notes_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";

/// The real router on an ephemeral local port, backed by a memory store the test can inspect
pub struct TestServer {
    pub base_url: String,
    pub store: MemoryNoteStore,
    client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        config.security.jwt_secret = SECRET.to_string();
        configure(&mut config);

        let store = MemoryNoteStore::new();
        let state = AppState::new(Arc::new(store.clone()), &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let router = app(state, &config);
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server");
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            store,
            client: reqwest::Client::new(),
            handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn notes_url(&self, path: &str) -> String {
        format!("{}/api/notes{}", self.base_url, path)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn token_for(user: Uuid) -> String {
    generate_jwt(&Claims::new(user, 1).expect("claims"), SECRET).expect("token")
}

/// Create a note through the API and return its JSON
pub async fn create_note(
    server: &TestServer,
    user: Uuid,
    body: serde_json::Value,
) -> Result<serde_json::Value> {
    let res = server
        .client()
        .post(server.notes_url("/addnotes"))
        .header("auth-token", token_for(user))
        .json(&body)
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "create failed: {}", res.status());
    Ok(res.json().await?)
}
