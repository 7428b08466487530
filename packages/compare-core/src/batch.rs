//! Batch loading of the starship catalog.
//!
//! Every required id is fetched concurrently through the sequence runner.
//! Summaries are collected in completion order, and the catalog is only
//! exposed once every fetch has settled and all of them succeeded. The
//! sort afterwards makes the order independent of network timing.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use swapi_client::{ShipId, StarshipSummary, SwapiError, Transport};
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::fetch::fetch_starship;

/// One of the two pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Selected catalog index of each picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub left: usize,
    pub right: usize,
}

impl Selection {
    /// Left on the first entry, right on the next one when there is one.
    pub fn initial(len: usize) -> Self {
        Self {
            left: 0,
            right: if len > 1 { 1 } else { 0 },
        }
    }

    pub fn get(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set(&mut self, side: Side, index: usize) {
        match side {
            Side::Left => self.left = index,
            Side::Right => self.right = index,
        }
    }

    pub fn is_same(&self) -> bool {
        self.left == self.right
    }
}

/// Sorted starship summaries plus the picker selection over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    ships: Vec<StarshipSummary>,
    selection: Selection,
}

impl Catalog {
    /// Build a catalog from already sorted summaries.
    pub fn new(ships: Vec<StarshipSummary>) -> Self {
        let selection = Selection::initial(ships.len());
        Self { ships, selection }
    }

    pub fn ships(&self) -> &[StarshipSummary] {
        &self.ships
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StarshipSummary> {
        self.ships.get(index)
    }

    /// Point one picker at `index`. Out of range indices are rejected.
    pub fn select(&mut self, side: Side, index: usize) -> Option<Selection> {
        if index >= self.ships.len() {
            return None;
        }
        self.selection.set(side, index);
        Some(self.selection)
    }

    /// Ids currently selected on the left and right.
    pub fn selected_ids(&self) -> Option<(ShipId, ShipId)> {
        let left = self.get(self.selection.left)?;
        let right = self.get(self.selection.right)?;
        Some((left.id, right.id))
    }
}

/// Fetch every id concurrently and build the sorted catalog.
///
/// Duplicate ids are fetched once per occurrence. If any fetch fails, the
/// failure of the earliest id in `ids` is returned and the collected
/// summaries are dropped. Fetches still in flight after a failure are driven
/// to completion; nothing is cancelled.
pub async fn load_catalog<T: Transport>(
    transport: Arc<T>,
    api_root: &str,
    ids: &[ShipId],
) -> Result<Catalog, CatalogError> {
    let mut fetches: FuturesUnordered<_> = ids
        .iter()
        .enumerate()
        .map(|(position, &id)| {
            let transport = transport.clone();
            async move {
                let settled = fetch_starship(transport, api_root, id)
                    .await
                    .map(|ship| ship.summarize(id));
                (position, settled)
            }
        })
        .collect();

    let mut ships = Vec::with_capacity(ids.len());
    // Failure with the lowest input position.
    let mut first_failure: Option<(usize, SwapiError)> = None;

    while let Some((position, settled)) = fetches.next().await {
        match settled {
            Ok(summary) => ships.push(summary),
            Err(err) => {
                warn!(error = %err, "Starship fetch failed during catalog load");
                let earlier_seen = first_failure
                    .as_ref()
                    .is_some_and(|(seen, _)| *seen < position);
                if !earlier_seen {
                    first_failure = Some((position, err));
                }
            }
        }
    }

    if let Some((_, err)) = first_failure {
        return Err(CatalogError::PartialFailure(err));
    }

    // Stable: duplicate ids keep the order they were collected in.
    ships.sort_by_key(|ship| ship.id);
    info!(
        count = ships.len(),
        "Loaded {} craft from server and sorted them by id",
        ships.len()
    );

    Ok(Catalog::new(ships))
}
