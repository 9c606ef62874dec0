use std::path::{Path, PathBuf};

use ayat::catalog::{CatalogDatabase, Verse};

/// `(sura, sura_name, aya)` rows inserted with ids starting at 1.
pub const FIXTURE_ROWS: &[(i64, &str, i64)] = &[
    (1, "Al-Fatiha", 1),
    (1, "Al-Fatiha", 2),
    (1, "Al-Fatiha", 3),
    (2, "Al-Baqarah", 1),
    (2, "Al-Baqarah", 2),
    (114, "An-Nas", 1),
];

/// Create an on-disk catalog with [`FIXTURE_ROWS`]; media paths are stored relative.
pub fn seed_catalog(db_path: &Path, media_root: &Path) -> CatalogDatabase {
    let db = CatalogDatabase::open(db_path, media_root).expect("open catalog");
    for (offset, (sura, name, aya)) in FIXTURE_ROWS.iter().enumerate() {
        let id = offset as i64 + 1;
        db.insert_verse(&Verse {
            id,
            audio_path: PathBuf::from(format!("audio/{id}.wav")),
            image_path: PathBuf::from(format!("images/{id}.png")),
            sura_number: *sura,
            sura_name: (*name).to_string(),
            aya_number: *aya,
            aya_suffix: None,
        })
        .expect("insert verse");
    }
    db
}
