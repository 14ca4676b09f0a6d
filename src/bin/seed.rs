use dotenvy::dotenv;
use portfolio_projects::app::{
    self,
    db,
    domain::{MediaKind, MediaRef, ProjectRecord},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use time::OffsetDateTime;

/// Insert a demo project with every media slot populated, for exercising the endpoints locally.
#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = app::config::Config::from_env()
        .expect("Failed to load config (check DATABASE_URL and other env vars)");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await
        .expect("Failed to set busy timeout");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let id = ulid::Ulid::new().to_string();
    let project = ProjectRecord {
        id: id.clone(),
        title: "Demo project".to_string(),
        category: "Web".to_string(),
        languages: vec!["Rust".to_string(), "TypeScript".to_string()],
        description: "Seeded for local development.".to_string(),
        github_link: "https://github.com/example/demo".to_string(),
        live_link: "https://demo.example.com".to_string(),
        cover_image: Some(media("demo/cover", "jpg", MediaKind::Image)),
        supporting_images: vec![
            media("demo/supporting_1", "jpg", MediaKind::Image),
            media("demo/supporting_2", "jpg", MediaKind::Image),
        ],
        video: Some(media("demo/video", "mp4", MediaKind::Video)),
        created_at: OffsetDateTime::now_utc().unix_timestamp(),
        updated_at: None,
    };

    if let Err(e) = db::projects::insert(&pool, &project).await {
        eprintln!("Seeding demo project failed: {}", e);
        std::process::exit(1);
    }

    eprintln!("Inserted demo project {}", id);
}

fn media(public_id: &str, ext: &str, kind: MediaKind) -> MediaRef {
    MediaRef::new(
        public_id,
        format!("https://res.cloudinary.com/demo/{}/upload/{}.{}", kind.resource_type(), public_id, ext),
        kind,
    )
}
