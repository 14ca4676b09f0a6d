#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use portfolio_projects::app::{
    self,
    domain::{MediaKind, MediaRef, ProjectRecord},
    media::{Destroyed, MediaError, MediaStore},
};
use portfolio_projects::create_router;
use sqlx::SqlitePool;

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_router(pool: SqlitePool, media: Arc<RecordingMediaStore>) -> axum::Router {
    let state = app::AppState {
        db: pool,
        media,
        config: app::config::Config::for_tests(),
    };
    create_router(state)
}

/// Media store fake: records every destroy call and optionally fails all of them.
#[derive(Default)]
pub struct RecordingMediaStore {
    fail_all: bool,
    calls: Mutex<Vec<(String, MediaKind)>>,
}

impl RecordingMediaStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_all: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> Vec<(String, MediaKind)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn released_ids(&self) -> Vec<String> {
        self.calls().into_iter().map(|(id, _)| id).collect()
    }
}

#[async_trait::async_trait]
impl MediaStore for RecordingMediaStore {
    async fn destroy(&self, public_id: &str, kind: MediaKind) -> Result<Destroyed, MediaError> {
        self.calls.lock().unwrap().push((public_id.to_string(), kind));
        if self.fail_all {
            return Err(MediaError::Http("media host unreachable".to_string()));
        }
        Ok(Destroyed::Deleted)
    }
}

pub fn image(id: &str) -> MediaRef {
    MediaRef::new(id, format!("https://res.example.com/{}.jpg", id), MediaKind::Image)
}

pub fn video(id: &str) -> MediaRef {
    MediaRef::new(id, format!("https://res.example.com/{}.mp4", id), MediaKind::Video)
}

/// Project with cover p1, supporting s1 and s2, video v1.
pub fn sample_project(id: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: "Portfolio site".to_string(),
        category: "Web".to_string(),
        languages: vec!["Rust".to_string()],
        description: "A portfolio".to_string(),
        github_link: "https://github.com/example/site".to_string(),
        live_link: "https://site.example.com".to_string(),
        cover_image: Some(image("p1")),
        supporting_images: vec![image("s1"), image("s2")],
        video: Some(video("v1")),
        created_at: 1_700_000_000,
        updated_at: None,
    }
}

pub async fn insert_project(pool: &SqlitePool, project: &ProjectRecord) {
    app::db::projects::insert(pool, project).await.unwrap();
}

pub fn json_post(uri: &str, body: serde_json::Value) -> http::Request<axum::body::Body> {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body_bytes).unwrap()
}
