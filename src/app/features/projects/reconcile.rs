//! Merge of a stored project with an update request.
//!
//! Pure: computes the next record and the media references the caller must
//! release. Never touches the document store or the media store.

use std::collections::HashSet;

use serde::{de::Deserializer, Deserialize};

use crate::app::domain::{MediaKind, MediaRef, ProjectRecord};

/// Treats an explicit JSON null like an omitted key.
fn null_as_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Requested mutations for a project. Scalars always overwrite; omitted scalars overwrite with empty values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectUpdate {
    #[serde(rename = "projectTitle", deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "projectCategory", deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub github_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub live_link: String,
    #[serde(rename = "toDeleteCover", deserialize_with = "null_as_default")]
    pub delete_cover: bool,
    #[serde(rename = "toDeleteSupporting", deserialize_with = "null_as_default")]
    pub delete_supporting: Vec<String>,
    #[serde(rename = "toDeleteVideo", deserialize_with = "null_as_default")]
    pub delete_video: bool,
    pub new_cover_image: Option<MediaRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub new_supporting_images: Vec<MediaRef>,
    pub new_video: Option<MediaRef>,
}

/// Next state of a project plus the media it no longer references.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub record: ProjectRecord,
    /// In slot order (cover, supporting images, video), unique per (public id, kind),
    /// never referenced by `record`.
    pub to_release: Vec<MediaRef>,
}

pub fn reconcile(old: ProjectRecord, update: ProjectUpdate) -> Reconciled {
    let mut to_release = Vec::new();

    let cover_image = reconcile_slot(
        old.cover_image,
        update.delete_cover,
        update.new_cover_image,
        MediaKind::Image,
        &mut to_release,
    );

    let delete_ids: HashSet<&str> = update.delete_supporting.iter().map(String::as_str).collect();
    let (removed, mut supporting_images): (Vec<MediaRef>, Vec<MediaRef>) = old
        .supporting_images
        .into_iter()
        .partition(|img| delete_ids.contains(img.public_id.as_str()));
    to_release.extend(removed.into_iter().map(|img| img.with_kind(MediaKind::Image)));

    for img in update.new_supporting_images {
        // Keep public ids unique within the slot.
        if !supporting_images.iter().any(|kept| kept.public_id == img.public_id) {
            supporting_images.push(img.with_kind(MediaKind::Image));
        }
    }

    let video = reconcile_slot(
        old.video,
        update.delete_video,
        update.new_video,
        MediaKind::Video,
        &mut to_release,
    );

    let record = ProjectRecord {
        id: old.id,
        title: update.title,
        category: update.category,
        languages: update.languages,
        description: update.description,
        github_link: update.github_link,
        live_link: update.live_link,
        cover_image,
        supporting_images,
        video,
        created_at: old.created_at,
        updated_at: old.updated_at,
    };

    // Never release an asset the new record still points at (e.g. deleted and re-added
    // in the same request). Media host ids are scoped by kind.
    let still_referenced = record.media();
    let kept: HashSet<(&str, MediaKind)> = still_referenced
        .iter()
        .map(|m| (m.public_id.as_str(), m.kind))
        .collect();
    let mut seen = HashSet::new();
    to_release.retain(|media| {
        !kept.contains(&(media.public_id.as_str(), media.kind))
            && seen.insert((media.public_id.clone(), media.kind))
    });

    Reconciled { record, to_release }
}

/// Single-media slot rule shared by cover and video.
///
/// An explicit delete of an existing asset wins and leaves the slot empty.
/// Otherwise a replacement takes the slot and releases the previous asset
/// unless it is the same public id. With neither, the old value stays.
fn reconcile_slot(
    old: Option<MediaRef>,
    delete: bool,
    replacement: Option<MediaRef>,
    kind: MediaKind,
    to_release: &mut Vec<MediaRef>,
) -> Option<MediaRef> {
    let replacement = replacement.map(|m| m.with_kind(kind));
    match (old, replacement) {
        (Some(old), _) if delete => {
            to_release.push(old.with_kind(kind));
            None
        }
        (Some(old), Some(new)) => {
            if old.public_id != new.public_id {
                to_release.push(old.with_kind(kind));
            }
            Some(new)
        }
        (None, Some(new)) => Some(new),
        (old, None) => old,
    }
}
