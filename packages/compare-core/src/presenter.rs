//! Presentation seam.
//!
//! The core never renders or alerts. It sends render instructions through
//! this trait and leaves the how to the implementation.

use crate::batch::Catalog;
use crate::comparator::ComparisonResult;

pub trait Presenter: Send + Sync {
    /// Show or hide the initial catalog loading state.
    fn catalog_loading(&self, loading: bool);

    /// Fill both pickers from the catalog and apply its initial selection.
    fn populate_pickers(&self, catalog: &Catalog);

    /// Disable the comparison controls and show progress, or undo that.
    fn comparison_loading(&self, loading: bool);

    /// Mark the right picker invalid with a message, or clear it with `None`.
    fn selection_invalid(&self, message: Option<&str>);

    /// Render comparison rows, in order.
    fn show_comparison(&self, results: &[ComparisonResult]);

    fn show_error(&self, error: &(dyn std::error::Error + 'static));
}
