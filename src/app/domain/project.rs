use serde::Serialize;

use super::{MediaKind, MediaRef};

/// A portfolio project document as stored in the document store.
///
/// Serialized with the same camelCase keys clients send in update requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    #[serde(rename = "projectTitle")]
    pub title: String,
    #[serde(rename = "projectCategory")]
    pub category: String,
    pub languages: Vec<String>,
    pub description: String,
    pub github_link: String,
    pub live_link: String,
    pub cover_image: Option<MediaRef>,
    pub supporting_images: Vec<MediaRef>,
    pub video: Option<MediaRef>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl ProjectRecord {
    /// Every media reference held by the record, in slot order: cover, supporting images, video.
    /// Each reference is scoped to the kind of the slot it lives in.
    pub fn media(&self) -> Vec<MediaRef> {
        let mut media = Vec::with_capacity(self.supporting_images.len() + 2);
        if let Some(cover) = &self.cover_image {
            media.push(cover.clone().with_kind(MediaKind::Image));
        }
        media.extend(
            self.supporting_images
                .iter()
                .map(|img| img.clone().with_kind(MediaKind::Image)),
        );
        if let Some(video) = &self.video {
            media.push(video.clone().with_kind(MediaKind::Video));
        }
        media
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProjectRecord {
        ProjectRecord {
            id: "proj-1".to_string(),
            title: "Title".to_string(),
            category: "Web".to_string(),
            languages: vec!["Rust".to_string()],
            description: String::new(),
            github_link: String::new(),
            live_link: String::new(),
            cover_image: None,
            supporting_images: Vec::new(),
            video: None,
            created_at: 0,
            updated_at: None,
        }
    }

    #[test]
    fn media_lists_slots_in_order_with_slot_kinds() {
        let mut project = record();
        project.cover_image = Some(MediaRef::new("c1", "", MediaKind::Video));
        project.supporting_images = vec![
            MediaRef::new("s1", "", MediaKind::Image),
            MediaRef::new("s2", "", MediaKind::Image),
        ];
        project.video = Some(MediaRef::new("v1", "", MediaKind::Image));

        let media = project.media();
        let ids: Vec<&str> = media.iter().map(|m| m.public_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "s1", "s2", "v1"]);
        assert_eq!(media[0].kind, MediaKind::Image);
        assert_eq!(media[3].kind, MediaKind::Video);
    }

    #[test]
    fn media_is_empty_for_bare_record() {
        assert!(record().media().is_empty());
    }

    #[test]
    fn serializes_title_and_category_with_project_prefix() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["projectTitle"], "Title");
        assert_eq!(json["projectCategory"], "Web");
        assert_eq!(json["githubLink"], "");
        assert!(json["coverImage"].is_null());
    }
}
