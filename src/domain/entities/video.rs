//! Video catalog entities.

use serde::{Deserialize, Serialize};

/// A video hosted on YouTube.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Stable identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Caption.
    pub description: String,
    /// YouTube video id.
    pub youtube_id: String,
    /// Category tag.
    pub category: String,
    /// Custom thumbnail path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Whether the video is highlighted on the landing page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl VideoRecord {
    /// Returns true if the video is flagged as featured.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }
}

/// One category section of the video catalog.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCategory {
    pub id: String,
    pub name: String,
    pub videos: Vec<VideoRecord>,
}

/// The video catalog as stored in `videos.json`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCatalog {
    pub title: String,
    pub description: String,
    pub categories: Vec<VideoCategory>,
}

impl VideoCatalog {
    /// Hardcoded catalog shown when `videos.json` cannot be loaded.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            title: "Videos".to_string(),
            description: "With special visual effects & animations".to_string(),
            categories: vec![VideoCategory {
                id: "horizontal".to_string(),
                name: "Horizontal".to_string(),
                videos: vec![VideoRecord {
                    id: "video1".to_string(),
                    title: "Introductory Video".to_string(),
                    description: "Introductory reel showing video editing work".to_string(),
                    youtube_id: "zHbvM82MVXw".to_string(),
                    category: "horizontal".to_string(),
                    thumbnail: None,
                    featured: Some(true),
                }],
            }],
        }
    }

    /// Iterates over featured videos in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &VideoRecord> {
        self.categories
            .iter()
            .flat_map(|c| c.videos.iter())
            .filter(|v| v.is_featured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_videos_json() {
        let json = r#"{
            "title": "Videos",
            "description": "Reels",
            "categories": [{
                "id": "vertical",
                "name": "Vertical",
                "videos": [
                    {"id": "a", "title": "A", "description": "", "youtubeId": "yt-a", "category": "vertical"},
                    {"id": "b", "title": "B", "description": "", "youtubeId": "yt-b", "category": "vertical",
                     "thumbnail": "/thumbs/b.jpg", "featured": true}
                ]
            }]
        }"#;

        let catalog: VideoCatalog = serde_json::from_str(json).unwrap();
        let videos = &catalog.categories[0].videos;
        assert_eq!(videos[0].youtube_id, "yt-a");
        assert!(!videos[0].is_featured());
        assert_eq!(videos[1].thumbnail.as_deref(), Some("/thumbs/b.jpg"));

        let featured: Vec<_> = catalog.featured().map(|v| v.id.as_str()).collect();
        assert_eq!(featured, vec!["b"]);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut catalog = VideoCatalog::sample();
        catalog.categories[0].videos[0].featured = None;

        let json = serde_json::to_value(&catalog).unwrap();
        let video = &json["categories"][0]["videos"][0];
        assert_eq!(video["youtubeId"], "zHbvM82MVXw");
        assert!(video.get("featured").is_none());
        assert!(video.get("thumbnail").is_none());
    }
}
