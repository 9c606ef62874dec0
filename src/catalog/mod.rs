//! Verse catalog: the ordered verse list plus the persisted playback settings.

mod db;
mod schema;
mod surahs;

use std::collections::HashMap;
use std::path::PathBuf;

pub use db::{CATALOG_DB_FILE_NAME, CatalogDatabase, CatalogError, PlaybackSettings};
pub use surahs::{SurahEntry, SurahIndex};

/// One verse with its resolved media paths.
#[derive(Clone, Debug, PartialEq)]
pub struct Verse {
    pub id: i64,
    pub audio_path: PathBuf,
    pub image_path: PathBuf,
    pub sura_number: i64,
    pub sura_name: String,
    pub aya_number: i64,
    /// Secondary numbering for verses split across several clips.
    pub aya_suffix: Option<i64>,
}

impl Verse {
    /// Text shown in the status line, e.g. `Surah Al-Fatiha - Ayah 3 - 2`.
    pub fn status_label(&self) -> String {
        let mut label = format!("Surah {} - Ayah {}", self.sura_name, self.aya_number);
        if let Some(suffix) = self.aya_suffix
            && suffix != 0
        {
            label.push_str(&format!(" - {suffix}"));
        }
        label
    }
}

/// Verses ordered by id, with lookups by id and by surah.
#[derive(Debug)]
pub struct Catalog {
    verses: Vec<Verse>,
    index_by_id: HashMap<i64, usize>,
    surahs: SurahIndex,
}

impl Catalog {
    /// Build a catalog; fails with [`CatalogError::Empty`] when there is nothing to play.
    pub fn new(mut verses: Vec<Verse>) -> Result<Self, CatalogError> {
        if verses.is_empty() {
            return Err(CatalogError::Empty);
        }
        verses.sort_by_key(|verse| verse.id);
        let before = verses.len();
        verses.dedup_by_key(|verse| verse.id);
        if verses.len() != before {
            tracing::warn!(
                dropped = before - verses.len(),
                "Catalog contained duplicate verse ids"
            );
        }
        let index_by_id = verses
            .iter()
            .enumerate()
            .map(|(index, verse)| (verse.id, index))
            .collect();
        let surahs = SurahIndex::build(&verses);
        Ok(Self {
            verses,
            index_by_id,
            surahs,
        })
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Always false; an empty catalog cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Verse> {
        self.verses.get(index)
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    pub fn surahs(&self) -> &SurahIndex {
        &self.surahs
    }

    /// Position of the verse `(sura_number, aya_number)`, first clip when split.
    pub fn index_of_aya(&self, sura_number: i64, aya_number: i64) -> Option<usize> {
        self.surahs.find_verse_index(sura_number, aya_number)
    }
}
