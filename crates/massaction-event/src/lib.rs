//! Mass Action Events
//!
//! Domain events raised by bulk actions on course modules.
//!
//! # Core Concepts
//!
//! - [`MassActionDuplicated`]: fired after a bulk duplication completes
//! - [`EventBus`]: seam to the host event/logging framework
//! - [`EventLog`]: in-memory bus
//! - [`TracingEventBus`]: bus writing structured log lines
//!
//! # Example
//!
//! ```rust
//! use massaction_event::{EventContext, EventLog, MassActionDuplicated};
//!
//! let log = EventLog::new();
//! let event = MassActionDuplicated::from_duplication(
//!     EventContext::new(42),
//!     vec![(12, 45), (13, 46)],
//!     Vec::new(),
//! );
//! event.trigger(&log).unwrap();
//!
//! assert_eq!(
//!     log.records()[0].description,
//!     "Mass action duplicate has been completed. cmid from '12' to '45', cmid from '13' to '46'"
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod bus;
pub mod duplicated;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use bus::{EventBus, EventLog, TracingEventBus};
pub use duplicated::{EventContext, MassActionDuplicated};
pub use error::{EventError, EventResult};
pub use types::{Crud, EduLevel, EventRecord};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
