//! Domain entity definitions.

mod image;
mod picture;
mod video;

pub use self::image::{ImageKey, ImageSource, LoadedImage};
pub use picture::{Category, PictureCatalog, PictureCategory, PictureRecord};
pub use video::{VideoCatalog, VideoCategory, VideoRecord};
