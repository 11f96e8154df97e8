#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dockyard_api::config::{ServerConfig, StoreConfig};
use dockyard_api::router::build_app_router;
use dockyard_api::state::AppState;
use dockyard_core::template::{
    ContainerSpec, StackSpec, Template, TemplateKind, TemplateRepository, TemplateType,
};
use dockyard_core::types::DbId;
use dockyard_db::{MemoryTemplateStore, StoreError, TemplateStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreConfig::Memory {
            templates_file: None,
        },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn TemplateStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Container template `1` and stack template `2`.
pub fn seeded_store() -> Arc<MemoryTemplateStore> {
    let mut nginx = Template::new(1, TemplateType::Container);
    nginx.title = "Nginx".into();
    nginx.categories = vec!["webserver".into()];
    nginx.kind = TemplateKind::Container(ContainerSpec {
        image: "nginx".into(),
        ports: vec!["80/tcp".into()],
        hostname: "a".into(),
        ..Default::default()
    });

    let mut wordpress = Template::new(2, TemplateType::Stack);
    wordpress.title = "Wordpress".into();
    wordpress.kind = TemplateKind::Stack(StackSpec {
        repository: TemplateRepository {
            url: "r1".into(),
            stackfile: "f1".into(),
        },
    });

    Arc::new(MemoryTemplateStore::with_templates([nginx, wordpress]))
}

/// Which store operation a [`FailingStore`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Fetch,
    Store,
}

/// Store that serves from an inner memory store but fails one operation
/// with a storage error.
pub struct FailingStore {
    pub inner: Arc<MemoryTemplateStore>,
    pub fail_on: FailOn,
}

#[async_trait]
impl TemplateStore for FailingStore {
    async fn fetch(&self, id: DbId) -> Result<Template, StoreError> {
        if self.fail_on == FailOn::Fetch {
            return Err(StoreError::Storage("disk on fire".into()));
        }
        self.inner.fetch(id).await
    }

    async fn store(&self, template: &Template) -> Result<(), StoreError> {
        if self.fail_on == FailOn::Store {
            return Err(StoreError::Storage("disk on fire".into()));
        }
        self.inner.store(template).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Storage("disk on fire".into()))
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn put_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    put_raw(app, uri, json.to_string()).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
