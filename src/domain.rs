//! Domain module - catalog entities and the rules that shape them
//!
//! Pure, synchronous logic: classification, identity, deduplication and the
//! bookkeeping types of the synchronization step. No I/O lives here.

pub mod catalog;
pub mod classification;
pub mod sync;
pub mod template;
pub mod vehicle;
pub mod vehicle_id;

// Re-export commonly used items for convenience
pub use catalog::{IngestOutcome, ResolvedRow, VehicleCatalog};
pub use classification::{Classification, Classifier, VehicleTag};
pub use sync::{ChunkResult, Dataset, DatasetReport, SyncSummary, plan_chunks};
pub use template::MaintenanceTemplate;
pub use vehicle::{DEFAULT_TEMPLATE_ID, RawRowRecord, VehicleRecord};
pub use vehicle_id::{DetailLink, IdentityError};
