use thiserror::Error;

use crate::catalog::{Catalog, CatalogDatabase, CatalogError};
use crate::config::{self, AppConfig, ConfigError};
use crate::navigation::NavigationSequencer;
use crate::playback::{RodioOutput, RodioTransportFactory, TransportError};

use super::controller::PlayerController;

/// Controller type used by the desktop app.
pub type DesktopController = PlayerController<CatalogDatabase, RodioTransportFactory>;

/// Errors that stop the player window from opening.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to load verse catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Failed to open audio output: {0}")]
    Audio(#[from] TransportError),
}

/// Open the catalog and audio output described by `config`.
pub fn build_controller(config: &AppConfig) -> Result<DesktopController, StartupError> {
    let paths = config::resolve_paths(config)?;
    tracing::info!(
        database = %paths.database.display(),
        media = %paths.media_root.display(),
        "Opening verse catalog"
    );
    let database = CatalogDatabase::open(&paths.database, paths.media_root)?;
    let catalog = Catalog::new(database.load_all()?)?;
    let settings = database.settings()?;
    tracing::info!(
        verses = catalog.len(),
        surahs = catalog.surahs().entries().len(),
        current = settings.current_verse_id,
        speed = %settings.speed,
        "Catalog loaded"
    );
    let output = RodioOutput::open_default()?;
    let factory = RodioTransportFactory::new(output, config.position_interval());
    let sequencer = NavigationSequencer::new(
        catalog,
        database,
        factory,
        settings,
        config.sequencer_options(),
    );
    Ok(PlayerController::new(sequencer))
}
