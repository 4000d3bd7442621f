//! Pairs raw and edited picture files into comparison records.
//!
//! A directory holds files named `"{base} raw.jpg"` and `"{base} edit.jpg"`
//! (`.jpeg` also accepted, suffix matched case-insensitively). A record is
//! produced for a base name only when both variants are present.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::domain::entities::{Category, PictureRecord};

const RAW_SUFFIXES: [&str; 2] = [" raw.jpg", " raw.jpeg"];
const EDITED_SUFFIXES: [&str; 2] = [" edit.jpg", " edit.jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Raw,
    Edited,
}

#[derive(Debug, Default)]
struct PairGroup<'a> {
    raw: Option<&'a str>,
    edited: Option<&'a str>,
}

/// Resolves directory listings into picture records.
#[derive(Debug, Clone)]
pub struct PicturePairing {
    base: String,
}

impl PicturePairing {
    /// Creates a resolver that builds paths under the public prefix `base`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Groups `files` by base name and returns one record per complete pair.
    ///
    /// Records are ordered by id. Files that are not JPEGs, lack a raw/edit
    /// suffix, or have no counterpart are skipped without error.
    pub fn resolve<S: AsRef<str>>(&self, files: &[S], category: Category) -> Vec<PictureRecord> {
        let mut groups: BTreeMap<&str, PairGroup<'_>> = BTreeMap::new();

        for file in files {
            let file = file.as_ref();
            if !is_jpeg(file) {
                continue;
            }
            let Some((base, variant)) = classify(file) else {
                trace!(file, "Skipping file without raw/edit suffix");
                continue;
            };

            let group = groups.entry(base).or_default();
            match variant {
                Variant::Raw => group.raw = Some(file),
                Variant::Edited => group.edited = Some(file),
            }
        }

        // Keyed by id: colliding slugs overwrite the earlier record.
        let mut records: BTreeMap<String, PictureRecord> = BTreeMap::new();
        for (base, group) in groups {
            let (Some(raw), Some(edited)) = (group.raw, group.edited) else {
                debug!(base, %category, "Dropping incomplete picture pair");
                continue;
            };
            let id = slugify(base);
            let record = PictureRecord::new(id.clone(), base, category, &self.base, raw, edited);
            records.insert(id, record);
        }

        debug!(%category, count = records.len(), "Resolved picture pairs");
        records.into_values().collect()
    }
}

/// Derives a URL slug: lowercase, runs of non `[a-z0-9]` become one hyphen,
/// no leading or trailing hyphen.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

fn is_jpeg(file: &str) -> bool {
    ends_with_ignore_case(file, ".jpg") || ends_with_ignore_case(file, ".jpeg")
}

fn classify(file: &str) -> Option<(&str, Variant)> {
    let suffixes = RAW_SUFFIXES
        .iter()
        .map(|s| (*s, Variant::Raw))
        .chain(EDITED_SUFFIXES.iter().map(|s| (*s, Variant::Edited)));

    for (suffix, variant) in suffixes {
        if ends_with_ignore_case(file, suffix) {
            let base = &file[..file.len() - suffix.len()];
            return (!base.is_empty()).then_some((base, variant));
        }
    }
    None
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
