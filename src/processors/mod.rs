pub mod alignment;
pub mod centroid_builder;
pub mod grid_processor;
pub mod row_emitter;

pub use alignment::{AlignmentChecker, AlignmentIssue, AlignmentReport};
pub use centroid_builder::CentroidBuilder;
pub use grid_processor::{ConversionSummary, GridProcessor, MapSummary, RunOutcome};
pub use row_emitter::RowEmitter;
