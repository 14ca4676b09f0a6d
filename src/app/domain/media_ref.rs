use serde::{Deserialize, Serialize};

/// Kind of asset a media reference points at. Decides the resource scope used when destroying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Resource type segment used by the media host's API.
    pub fn resource_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Pointer from a project to an asset hosted in the media store.
///
/// `kind` is optional on the wire; the slot the reference is stored in
/// (cover, supporting image, video) overrides it via [`MediaRef::with_kind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    #[serde(default)]
    pub public_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub kind: MediaKind,
}

impl MediaRef {
    pub fn new(public_id: impl Into<String>, url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            public_id: public_id.into(),
            url: url.into(),
            kind,
        }
    }

    /// Same reference, re-scoped to `kind`.
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    /// Only references with a non-blank public id can be sent to the media store.
    pub fn is_releasable(&self) -> bool {
        !self.public_id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_defaults_to_image_when_omitted() {
        let media: MediaRef =
            serde_json::from_str(r#"{"publicId":"p1","url":"https://res.example.com/p1.jpg"}"#).unwrap();
        assert_eq!(media.public_id, "p1");
        assert_eq!(media.kind, MediaKind::Image);
    }

    #[test]
    fn kind_is_lowercase_on_the_wire() {
        let media = MediaRef::new("v1", "https://res.example.com/v1.mp4", MediaKind::Video);
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["kind"], "video");
        assert_eq!(json["publicId"], "v1");
    }

    #[test]
    fn blank_public_id_is_not_releasable() {
        assert!(!MediaRef::new("  ", "", MediaKind::Image).is_releasable());
        assert!(MediaRef::new("p1", "", MediaKind::Image).is_releasable());
    }

    #[test]
    fn resource_type_matches_kind() {
        assert_eq!(MediaKind::Image.resource_type(), "image");
        assert_eq!(MediaKind::Video.resource_type(), "video");
    }
}
