mod support;

use support::{
    ayat_env::AyatEnvGuard,
    catalog::{FIXTURE_ROWS, seed_catalog},
    transport::FakeFactory,
};

use ayat::catalog::{Catalog, CatalogDatabase};
use ayat::commands::{Command, dispatch};
use ayat::config::{self, AppConfig};
use ayat::navigation::{NavigationSequencer, SequencerOptions};
use ayat::playback::{PlaybackState, SessionSignal, TransportEvent};
use tempfile::TempDir;

struct Harness {
    _temp: TempDir,
    db_path: std::path::PathBuf,
    media_root: std::path::PathBuf,
}

impl Harness {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let db_path = temp.path().join("data").join("aya.db");
        let media_root = temp.path().join("q_files");
        seed_catalog(&db_path, &media_root);
        Self {
            _temp: temp,
            db_path,
            media_root,
        }
    }

    fn sequencer(
        &self,
        factory: FakeFactory,
        options: SequencerOptions,
    ) -> NavigationSequencer<CatalogDatabase, FakeFactory> {
        let db = CatalogDatabase::open(&self.db_path, &self.media_root).expect("open catalog");
        let catalog = Catalog::new(db.load_all().expect("load verses")).expect("non-empty");
        let settings = db.settings().expect("settings");
        NavigationSequencer::new(catalog, db, factory, settings, options)
    }
}

#[test]
fn position_survives_restart() {
    let harness = Harness::new();
    {
        let mut seq = harness.sequencer(FakeFactory::new(Some(4.0)), SequencerOptions::default());
        assert_eq!(seq.current_verse().id, 1);
        dispatch(&mut seq, Command::Next).unwrap();
        dispatch(&mut seq, Command::Next).unwrap();
        dispatch(&mut seq, Command::SpeedUp).unwrap();
        assert_eq!(seq.current_verse().id, 3);
    }
    let seq = harness.sequencer(FakeFactory::new(Some(4.0)), SequencerOptions::default());
    assert_eq!(seq.current_verse().id, 3);
    assert_eq!(seq.speed().value(), 1.1);
}

#[test]
fn wraps_from_last_surah_to_first() {
    let harness = Harness::new();
    let mut seq = harness.sequencer(FakeFactory::new(None), SequencerOptions::default());
    dispatch(&mut seq, Command::Previous).unwrap();
    assert_eq!(seq.current_verse().sura_name, "An-Nas");
    assert_eq!(seq.current_index(), FIXTURE_ROWS.len() - 1);
    dispatch(&mut seq, Command::Next).unwrap();
    assert_eq!(seq.current_verse().id, 1);
}

#[test]
fn verse_media_resolves_under_media_root() {
    let harness = Harness::new();
    let factory = FakeFactory::new(None);
    let mut seq = harness.sequencer(factory.clone(), SequencerOptions::default());
    dispatch(&mut seq, Command::SelectAya { sura: 2, aya: 2 }).unwrap();
    let opened = factory.latest();
    assert_eq!(
        opened.state.borrow().path,
        harness.media_root.join("audio").join("5.wav")
    );
    assert_eq!(
        seq.current_verse().image_path,
        harness.media_root.join("images").join("5.png")
    );
}

#[test]
fn preview_fades_and_pauses_over_ten_seconds() {
    let harness = Harness::new();
    let factory = FakeFactory::new(Some(10.0));
    let mut seq = harness.sequencer(factory.clone(), SequencerOptions::default());
    dispatch(&mut seq, Command::TogglePreview).unwrap();
    seq.pump().unwrap();
    dispatch(&mut seq, Command::Play).unwrap();

    let transport = factory.latest();
    let mut signals = Vec::new();
    let mut position = 0.0;
    while position <= 7.0 {
        transport.push(TransportEvent::PositionChanged(position));
        signals.extend(seq.pump().unwrap());
        position += 0.05;
    }

    let state = transport.state.borrow();
    assert_eq!(state.seeks, vec![0.0]);
    assert_eq!(state.pauses, 1);
    assert_eq!(signals, vec![SessionSignal::PreviewFinished]);
    let fade: Vec<f32> = state.volumes[1..state.volumes.len() - 1].to_vec();
    assert!(fade.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(state.volumes.last().copied(), Some(1.0));
    assert!(!seq.session().unwrap().fade().is_armed());
    assert!(seq.preview_mode());
}

#[test]
fn completion_advances_and_autoplays_when_configured() {
    let harness = Harness::new();
    let factory = FakeFactory::new(Some(2.0));
    let options = SequencerOptions {
        autoplay_on_complete: true,
        ..SequencerOptions::default()
    };
    let mut seq = harness.sequencer(factory.clone(), options);
    seq.pump().unwrap();
    factory
        .latest()
        .push(TransportEvent::StateChanged(PlaybackState::Completed));
    assert_eq!(seq.pump().unwrap(), vec![SessionSignal::Completed]);
    assert_eq!(seq.current_verse().id, 2);

    seq.pump().unwrap();
    assert_eq!(factory.latest().state.borrow().plays, 1);
    assert_eq!(factory.opened_count(), 2);
}

#[test]
fn default_config_points_at_app_directory() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = AyatEnvGuard::set_config_home(temp.path().to_path_buf());
    let config = config::load_or_default().unwrap();
    assert_eq!(config, AppConfig::default());
    assert!(temp.path().join(".ayat").join("config.toml").exists());
    let paths = config::resolve_paths(&config).unwrap();
    assert_eq!(paths.database, temp.path().join(".ayat").join("aya.db"));
    assert_eq!(paths.media_root, temp.path().join(".ayat").join("q_files"));

    let db = CatalogDatabase::open(&paths.database, &paths.media_root).unwrap();
    assert_eq!(db.settings().unwrap().current_verse_id, 1);
    assert!(matches!(
        Catalog::new(db.load_all().unwrap()),
        Err(ayat::catalog::CatalogError::Empty)
    ));
}
