//! Application controller.
//!
//! Owns the catalog, the picker selection and the comparison state, and
//! turns user intents into render instructions for a [`Presenter`].
//!
//! # Comparison state
//!
//! ```text
//!           compare()              both fetches settled
//!   Idle ─────────────► Comparing ─────────────────────► Idle
//!                          │
//!                          └─ compare() while Comparing: dropped
//! ```
//!
//! The state lock is only held for a transition, never across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join;
use swapi_client::{ShipId, Transport};
use tracing::{debug, info, warn};

use crate::batch::{load_catalog, Catalog, Selection, Side};
use crate::comparator::{compare_ships, ComparisonResult};
use crate::error::{CatalogError, CompareError};
use crate::fetch::fetch_starship;
use crate::presenter::Presenter;

/// Whether a comparison is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonState {
    #[default]
    Idle,
    Comparing,
}

impl ComparisonState {
    /// Idle → Comparing. Returns `false` if a comparison is already running.
    pub fn begin(&mut self) -> bool {
        match self {
            ComparisonState::Idle => {
                *self = ComparisonState::Comparing;
                true
            }
            ComparisonState::Comparing => false,
        }
    }

    /// Comparing → Idle.
    pub fn finish(&mut self) {
        *self = ComparisonState::Idle;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the state to `Idle` and re-enables controls however the
/// comparison ends, including failure and unwinding.
struct ComparingGuard<'a, P: Presenter> {
    state: &'a Mutex<ComparisonState>,
    presenter: &'a P,
}

impl<P: Presenter> Drop for ComparingGuard<'_, P> {
    fn drop(&mut self) {
        lock(self.state).finish();
        self.presenter.comparison_loading(false);
    }
}

pub struct ComparisonController<T: Transport, P: Presenter> {
    transport: Arc<T>,
    presenter: P,
    api_root: String,
    required_ids: Vec<ShipId>,
    catalog: Mutex<Option<Catalog>>,
    state: Mutex<ComparisonState>,
}

impl<T: Transport, P: Presenter> ComparisonController<T, P> {
    pub fn new(
        transport: Arc<T>,
        presenter: P,
        api_root: impl Into<String>,
        required_ids: Vec<ShipId>,
    ) -> Self {
        Self {
            transport,
            presenter,
            api_root: api_root.into(),
            required_ids,
            catalog: Mutex::new(None),
            state: Mutex::new(ComparisonState::Idle),
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn state(&self) -> ComparisonState {
        *lock(&self.state)
    }

    pub fn catalog(&self) -> Option<Catalog> {
        lock(&self.catalog).clone()
    }

    /// Load the catalog of required ids and populate both pickers.
    ///
    /// On failure nothing is populated and the previous catalog, if any, is
    /// left untouched.
    pub async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        self.presenter.catalog_loading(true);

        match load_catalog(self.transport.clone(), &self.api_root, &self.required_ids).await {
            Ok(catalog) => {
                *lock(&self.catalog) = Some(catalog.clone());
                self.presenter.populate_pickers(&catalog);
                self.presenter.catalog_loading(false);
                Ok(catalog)
            }
            Err(err) => {
                warn!(error = %err, "Catalog load failed");
                self.presenter.show_error(&err);
                Err(err)
            }
        }
    }

    /// Change one picker and compare the new selection.
    ///
    /// Returns `Ok(None)` when the comparison was dropped because another one
    /// is still running.
    pub async fn select(
        &self,
        side: Side,
        index: usize,
    ) -> Result<Option<Vec<ComparisonResult>>, CompareError> {
        {
            let mut catalog = lock(&self.catalog);
            let catalog = catalog.as_mut().ok_or(CompareError::NoCatalog)?;
            let len = catalog.len();
            catalog
                .select(side, index)
                .ok_or(CompareError::SelectionOutOfRange { index, len })?;
        }

        self.compare_selected().await
    }

    /// Compare the two selected catalog entries.
    ///
    /// Identical picks are rejected before anything is fetched.
    pub async fn compare_selected(&self) -> Result<Option<Vec<ComparisonResult>>, CompareError> {
        let (selection, ids) = {
            let catalog = lock(&self.catalog);
            let catalog = catalog.as_ref().ok_or(CompareError::NoCatalog)?;
            (catalog.selection(), catalog.selected_ids())
        };

        if selection.is_same() {
            let err = CompareError::SameSelection;
            self.presenter.selection_invalid(Some(&err.to_string()));
            return Err(err);
        }
        self.presenter.selection_invalid(None);

        let (left, right) = ids.ok_or(CompareError::NoCatalog)?;
        self.compare(left, right).await
    }

    /// Fetch both starships in parallel and compare them.
    ///
    /// Both sides are re-fetched on every call. Returns `Ok(None)` without
    /// fetching when a comparison is already in flight.
    pub async fn compare(
        &self,
        left: ShipId,
        right: ShipId,
    ) -> Result<Option<Vec<ComparisonResult>>, CompareError> {
        if !lock(&self.state).begin() {
            debug!(%left, %right, "Comparison already in progress, dropping request");
            return Ok(None);
        }
        let _guard = ComparingGuard {
            state: &self.state,
            presenter: &self.presenter,
        };
        self.presenter.comparison_loading(true);

        let (left_ship, right_ship) = join(
            fetch_starship(self.transport.clone(), &self.api_root, left),
            fetch_starship(self.transport.clone(), &self.api_root, right),
        )
        .await;

        match left_ship.and_then(|l| right_ship.map(|r| (l, r))) {
            Ok((left_ship, right_ship)) => {
                let results = compare_ships(&left_ship, &right_ship);
                info!(%left, %right, rows = results.len(), "Comparison ready");
                self.presenter.show_comparison(&results);
                Ok(Some(results))
            }
            Err(err) => {
                let err = CompareError::from(err);
                warn!(%left, %right, error = %err, "Comparison failed");
                self.presenter.show_error(&err);
                Err(err)
            }
        }
    }

    /// Current picker selection, if the catalog is loaded.
    pub fn selection(&self) -> Option<Selection> {
        lock(&self.catalog).as_ref().map(Catalog::selection)
    }
}
