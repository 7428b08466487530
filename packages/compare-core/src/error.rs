//! Typed errors for catalog loading and comparisons.
//!
//! Transport and decode failures are wrapped, not split further: callers
//! react to both the same way.

use swapi_client::SwapiError;
use thiserror::Error;

/// Errors from loading the starship catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// At least one fetch of the batch failed; the whole catalog is discarded.
    #[error("failed to load starship catalog: {0}")]
    PartialFailure(#[source] SwapiError),
}

/// Errors from comparing two starships.
#[derive(Debug, Error)]
pub enum CompareError {
    /// One or both sides could not be fetched
    #[error("failed to fetch starships for comparison: {0}")]
    Fetch(#[from] SwapiError),

    /// Both pickers point at the same catalog entry
    #[error("This is the same ship as selected on the left")]
    SameSelection,

    /// Selection requested before the catalog loaded
    #[error("starship catalog has not been loaded")]
    NoCatalog,

    /// Picker index outside the loaded catalog
    #[error("selection {index} is out of range for a catalog of {len} starships")]
    SelectionOutOfRange { index: usize, len: usize },
}
