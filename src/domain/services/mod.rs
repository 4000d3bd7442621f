//! Domain services.

mod picture_pairing;

pub use picture_pairing::{PicturePairing, slugify};
