use std::collections::BTreeMap;

use super::Verse;

/// One surah as offered by the surah dropdown.
#[derive(Clone, Debug, PartialEq)]
pub struct SurahEntry {
    pub number: i64,
    pub name: String,
    /// Catalog position of the surah's first verse.
    pub first_index: usize,
    /// Distinct aya numbers in catalog order.
    pub aya_numbers: Vec<i64>,
    clips: Vec<(i64, usize)>,
}

impl SurahEntry {
    pub fn last_aya(&self) -> Option<i64> {
        self.aya_numbers.iter().copied().max()
    }
}

/// Surahs ordered by number.
#[derive(Clone, Debug, Default)]
pub struct SurahIndex {
    entries: Vec<SurahEntry>,
}

impl SurahIndex {
    pub(crate) fn build(verses: &[Verse]) -> Self {
        let mut by_number: BTreeMap<i64, SurahEntry> = BTreeMap::new();
        for (index, verse) in verses.iter().enumerate() {
            let entry = by_number
                .entry(verse.sura_number)
                .or_insert_with(|| SurahEntry {
                    number: verse.sura_number,
                    name: verse.sura_name.clone(),
                    first_index: index,
                    aya_numbers: Vec::new(),
                    clips: Vec::new(),
                });
            if !entry.aya_numbers.contains(&verse.aya_number) {
                entry.aya_numbers.push(verse.aya_number);
            }
            entry.clips.push((verse.aya_number, index));
        }
        Self {
            entries: by_number.into_values().collect(),
        }
    }

    pub fn entries(&self) -> &[SurahEntry] {
        &self.entries
    }

    pub fn get(&self, sura_number: i64) -> Option<&SurahEntry> {
        self.entries
            .binary_search_by_key(&sura_number, |entry| entry.number)
            .ok()
            .map(|pos| &self.entries[pos])
    }

    /// Catalog position of the first clip of `(sura_number, aya_number)`.
    pub fn find_verse_index(&self, sura_number: i64, aya_number: i64) -> Option<usize> {
        self.get(sura_number)?
            .clips
            .iter()
            .find(|(aya, _)| *aya == aya_number)
            .map(|(_, index)| *index)
    }
}
