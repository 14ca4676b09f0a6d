use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;

use crate::app::domain::{MediaRef, ProjectRecord};

/// Database row for projects table. Media slots and languages are JSON text columns.
#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    title: String,
    category: String,
    languages: Json<Vec<String>>,
    description: String,
    github_link: String,
    live_link: String,
    cover_image: Option<Json<MediaRef>>,
    supporting_images: Json<Vec<MediaRef>>,
    video: Option<Json<MediaRef>>,
    created_at: i64,
    updated_at: Option<i64>,
}

impl From<ProjectRow> for ProjectRecord {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            languages: row.languages.0,
            description: row.description,
            github_link: row.github_link,
            live_link: row.live_link,
            cover_image: row.cover_image.map(|m| m.0),
            supporting_images: row.supporting_images.0,
            video: row.video.map(|m| m.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, title, category, languages, description, github_link, live_link, cover_image, supporting_images, video, created_at, updated_at FROM projects";

/// Insert a new project document. `created_at` is taken from the record.
pub async fn insert<'e, E>(
    executor: E,
    project: &ProjectRecord,
) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        "INSERT INTO projects (id, title, category, languages, description, github_link, live_link, cover_image, supporting_images, video, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&project.id)
    .bind(&project.title)
    .bind(&project.category)
    .bind(Json(&project.languages))
    .bind(&project.description)
    .bind(&project.github_link)
    .bind(&project.live_link)
    .bind(project.cover_image.as_ref().map(Json))
    .bind(Json(&project.supporting_images))
    .bind(project.video.as_ref().map(Json))
    .bind(project.created_at)
    .bind(project.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Find a project by ID.
pub async fn find_by_id(
    pool: &sqlx::SqlitePool,
    id: &str,
) -> Result<Option<ProjectRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(ProjectRecord::from))
}

/// Overwrite every stored field of a project and stamp `updated_at`.
/// Returns `false` when no project has that id.
pub async fn update(
    pool: &sqlx::SqlitePool,
    project: &ProjectRecord,
) -> Result<bool, sqlx::Error> {
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let result = sqlx::query(
        "UPDATE projects SET title = ?, category = ?, languages = ?, description = ?, github_link = ?, live_link = ?, cover_image = ?, supporting_images = ?, video = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&project.title)
    .bind(&project.category)
    .bind(Json(&project.languages))
    .bind(&project.description)
    .bind(&project.github_link)
    .bind(&project.live_link)
    .bind(project.cover_image.as_ref().map(Json))
    .bind(Json(&project.supporting_images))
    .bind(project.video.as_ref().map(Json))
    .bind(now)
    .bind(&project.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a project by ID.
pub async fn delete(
    pool: &sqlx::SqlitePool,
    id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
