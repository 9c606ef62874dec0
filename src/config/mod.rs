//! Application settings stored as `config.toml` in the `.ayat` directory.

mod defaults;
mod io;
mod types;

use std::path::PathBuf;

pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save_to_path};
pub use types::{AppConfig, ConfigError, MEDIA_DIR_NAME};

use crate::app_dirs;

/// Database and media locations after applying defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub database: PathBuf,
    pub media_root: PathBuf,
}

/// Resolve where the catalog database and the media folder live.
pub fn resolve_paths(config: &AppConfig) -> Result<ResolvedPaths, ConfigError> {
    let database = match &config.database_path {
        Some(path) => path.clone(),
        None => {
            let root = app_dirs::app_root_dir().map_err(io::map_app_dir_error)?;
            config.database_path_in(&root)
        }
    };
    let media_root = config.media_root_for(&database);
    Ok(ResolvedPaths {
        database,
        media_root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::{APP_DIR_NAME, OverrideGuard};
    use crate::playback::FadeWindow;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let loaded = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(loaded, AppConfig::default());
        assert!(!loaded.autoplay_on_complete);
        assert_eq!(loaded.position_interval_ms, 200);
    }

    #[test]
    fn saves_and_loads_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = AppConfig {
            database_path: Some(PathBuf::from("/data/aya.db")),
            autoplay_on_complete: true,
            fade: FadeWindow {
                start: 0.2,
                end: 0.5,
                min_sample_interval: 0.05,
            },
            ..AppConfig::default()
        };
        save_to_path(&config, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "autoplay_on_complete = true\n[fade]\nend = 0.8\n").unwrap();
        let loaded = load_from(&path).unwrap();
        assert!(loaded.autoplay_on_complete);
        assert_eq!(loaded.fade.start, 0.30);
        assert_eq!(loaded.fade.end, 0.8);
        assert!(loaded.media_root.is_none());
    }

    #[test]
    fn invalid_values_are_normalized_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "position_interval_ms = 5\n[fade]\nstart = 0.7\nend = 0.6\n",
        )
        .unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.position_interval_ms, 20);
        assert_eq!(loaded.fade, FadeWindow::default());
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "autoplay_on_complete = \"maybe\"").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }

    #[test]
    fn default_paths_live_under_app_root() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let resolved = resolve_paths(&AppConfig::default()).unwrap();
        let root = base.path().join(APP_DIR_NAME);
        assert_eq!(resolved.database, root.join("aya.db"));
        assert_eq!(resolved.media_root, root.join(MEDIA_DIR_NAME));
        assert_eq!(config_path().unwrap(), root.join(CONFIG_FILE_NAME));
    }

    #[test]
    fn first_launch_writes_editable_defaults() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let path = base.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        assert_eq!(load_or_default().unwrap(), AppConfig::default());
        assert!(path.exists());
        assert_eq!(load_from(&path).unwrap(), AppConfig::default());

        std::fs::write(&path, "autoplay_on_complete = true\n").unwrap();
        assert!(load_or_default().unwrap().autoplay_on_complete);
    }

    #[test]
    fn explicit_paths_win() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/srv/quran/aya.db")),
            media_root: Some(PathBuf::from("/srv/media")),
            ..AppConfig::default()
        };
        let resolved = resolve_paths(&config).unwrap();
        assert_eq!(resolved.database, Path::new("/srv/quran/aya.db"));
        assert_eq!(resolved.media_root, Path::new("/srv/media"));

        let config = AppConfig {
            media_root: None,
            ..config
        };
        assert_eq!(
            resolve_paths(&config).unwrap().media_root,
            Path::new("/srv/quran").join(MEDIA_DIR_NAME)
        );
    }
}
