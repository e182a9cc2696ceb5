//! Common interface of the aggregation stages

use leadboard_common::LeadRecord;

/// A pure, total transformation of a lead snapshot into one derived view.
///
/// Implementations borrow the records, never reorder or mutate them, and
/// return the same output for the same input.
pub trait DataAggregator {
    type Output;

    fn aggregate(&self, records: &[LeadRecord]) -> Self::Output;
}
