//! Picture catalog entities.

use serde::{Deserialize, Serialize};

/// Orientation of a picture, implied by the directory it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Landscape pictures.
    Horizontal,
    /// Portrait pictures.
    Vertical,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Returns the tag used in ids, paths and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    /// Returns the human readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
        }
    }

    /// Returns the content subdirectory holding this category.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw/edited comparison pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureRecord {
    /// Slug derived from the base name.
    pub id: String,
    /// Base name, original casing.
    pub title: String,
    /// Caption shown under the comparison.
    pub description: String,
    /// Category of the source directory.
    pub category: Category,
    /// Public path of the unedited picture.
    #[serde(rename = "rawImage")]
    pub raw_path: String,
    /// Public path of the edited picture.
    #[serde(rename = "editedImage")]
    pub edited_path: String,
    /// Same as `category`; kept because the front end reads it separately.
    pub orientation: Category,
}

impl PictureRecord {
    /// Builds a record for `title` from the two matched filenames.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        base: &str,
        raw_file: &str,
        edited_file: &str,
    ) -> Self {
        let title = title.into();
        let base = base.trim_end_matches('/');
        Self {
            id: id.into(),
            description: format!("Professional editing work on {title}"),
            title,
            category,
            raw_path: format!("{base}/{category}/{raw_file}"),
            edited_path: format!("{base}/{category}/{edited_file}"),
            orientation: category,
        }
    }
}

/// One category section of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureCategory {
    /// Category tag.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pictures in this category.
    pub pictures: Vec<PictureRecord>,
}

impl PictureCategory {
    /// Creates a section for `category`.
    #[must_use]
    pub fn new(category: Category, pictures: Vec<PictureRecord>) -> Self {
        Self {
            id: category.as_str().to_string(),
            name: category.display_name().to_string(),
            pictures,
        }
    }
}

/// The picture catalog as consumed by the rendering front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureCatalog {
    /// Page title.
    pub title: String,
    /// Page subtitle.
    pub description: String,
    /// Non-empty category sections.
    pub categories: Vec<PictureCategory>,
}

impl PictureCatalog {
    /// Title used for generated catalogs.
    pub const DEFAULT_TITLE: &'static str = "Picture";
    /// Description used for generated catalogs.
    pub const DEFAULT_DESCRIPTION: &'static str = "See the difference!";

    /// Creates a generated catalog with the default heading.
    #[must_use]
    pub fn generated(categories: Vec<PictureCategory>) -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            description: Self::DEFAULT_DESCRIPTION.to_string(),
            categories,
        }
    }

    /// Hardcoded catalog shown when nothing else can be loaded.
    #[must_use]
    pub fn sample() -> Self {
        let picture = PictureRecord {
            id: "landscape-1".to_string(),
            title: "Sunset Landscape".to_string(),
            description: "Enhanced colors and contrast in this beautiful sunset scene".to_string(),
            category: Category::Horizontal,
            raw_path: "/images/sample-raw.jpg".to_string(),
            edited_path: "/images/sample-edited.jpg".to_string(),
            orientation: Category::Horizontal,
        };
        Self::generated(vec![PictureCategory::new(
            Category::Horizontal,
            vec![picture],
        )])
    }

    /// Total number of pictures across categories.
    #[must_use]
    pub fn picture_count(&self) -> usize {
        self.categories.iter().map(|c| c.pictures.len()).sum()
    }

    /// Iterates over every picture in catalog order.
    pub fn pictures(&self) -> impl Iterator<Item = &PictureRecord> {
        self.categories.iter().flat_map(|c| c.pictures.iter())
    }
}
