//! # Compare Core
//!
//! Fetch sequencing, batch loading and side-by-side comparison of starships
//! from the SWAPI catalog.
//!
//! ## Architecture
//!
//! ```text
//! Presenter (pickers, table, errors)
//!     ▲
//!     │ render instructions
//!     │
//! ComparisonController ── Idle ⇄ Comparing
//!     │
//!     ├─► load_catalog(ids) ── N × run(FetchStarship) ── all settle ── sort by id
//!     │
//!     └─► compare(left, right) ── 2 × run(FetchStarship) ── compare_ships()
//!                                        │
//!                                        ▼
//!                           Transport::get ──► Transport::decode
//! ```
//!
//! ## Key Invariants
//!
//! 1. **One resumption path** - operation success and failure both re-enter
//!    a procedure through `resume`
//! 2. **All-or-nothing catalog** - one failed fetch discards the whole batch
//! 3. **Deterministic order** - the catalog is sorted by id, not by arrival
//! 4. **One comparison at a time** - requests while comparing are dropped
//! 5. **No caching** - every comparison re-fetches both starships
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use compare_core::ComparisonController;
//! use swapi_client::SwapiClient;
//!
//! let client = Arc::new(SwapiClient::new());
//! let api_root = client.base_url().to_string();
//! let controller = ComparisonController::new(client, my_presenter, api_root, ids);
//!
//! controller.load_catalog().await?;
//! controller.compare_selected().await?;
//! ```

pub mod batch;
pub mod comparator;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod presenter;
pub mod runner;

// Testing utilities (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use batch::{load_catalog, Catalog, Selection, Side};
pub use comparator::{
    compare_ships, compare_values, try_parse_numeric, ComparisonField, ComparisonResult,
};
pub use controller::{ComparisonController, ComparisonState};
pub use error::{CatalogError, CompareError};
pub use fetch::{fetch_starship, FetchStarship, FetchValue};
pub use presenter::Presenter;
pub use runner::{run, Operation, Procedure, ProcedureStep, Step};
