use crate::list::{ListEngine, SnapshotError};
use crate::render::Renderer;
use crate::storage::SnapshotStore;
use anyhow::Result;
use tracing::{info, warn};

/// One load/save cycle of the list: the snapshot is read once on open and
/// written once on close.
pub struct Session<R: Renderer, S: SnapshotStore> {
    engine: ListEngine<R>,
    store: S,
    recovered_from: Option<SnapshotError>,
}

impl<R: Renderer, S: SnapshotStore> Session<R, S> {
    /// Load the stored snapshot and rebuild the list from it.
    ///
    /// A corrupt snapshot does not fail the open: the list starts empty and
    /// the error is kept in [`Session::recovered_from`]. This covers both a
    /// store that hands back a [`SnapshotError`] and a snapshot that fails to
    /// decode. Other store errors are returned.
    pub fn open(store: S, renderer: R) -> Result<Self> {
        let (snapshot, mut recovered_from) = match store.load() {
            Ok(snapshot) => (snapshot, None),
            Err(err) => (None, Some(err.downcast::<SnapshotError>()?)),
        };

        let mut engine = ListEngine::new(renderer);
        if let Err(err) = engine.initialize(snapshot.as_deref()) {
            recovered_from = Some(err);
        }
        if let Some(err) = &recovered_from {
            warn!(error = %err, "discarding unreadable snapshot, starting with an empty list");
        }

        info!(items = engine.len(), "list session opened");
        Ok(Self {
            engine,
            store,
            recovered_from,
        })
    }

    pub fn engine(&self) -> &ListEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListEngine<R> {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The snapshot error the session recovered from on open, if any.
    pub fn recovered_from(&self) -> Option<&SnapshotError> {
        self.recovered_from.as_ref()
    }

    /// Serialize every live item and save it. Hands back the engine and store.
    pub fn close(mut self) -> Result<(ListEngine<R>, S)> {
        let snapshot = self.engine.serialize_all()?;
        self.store.save(&snapshot)?;
        info!(items = self.engine.len(), "list session closed");
        Ok((self.engine, self.store))
    }
}
