//! Sorter - Declarative sort pipelines for in-memory collections.
//!
//! Sorter turns a short chain of steps into a comparator and sorts a slice
//! with it. It supports:
//!
//! - Extraction by key path or by named call, with fallback for items that
//!   answer neither
//! - Case folding
//! - Ascending/descending order with independent nil placement
//! - Stable results, sorted copies or in-place sorting
//! - Pipelines loaded from YAML or JSON
//!
//! # Quick Start
//!
//! ```rust
//! use standout_sorter::{Args, Extract, Sorter, Value};
//!
//! struct Task {
//!     name: String,
//!     priority: Option<i64>,
//! }
//!
//! impl Extract for Task {
//!     fn to_value(&self) -> Value {
//!         Value::from(&self.name)
//!     }
//!
//!     fn call(&self, name: &str, _args: &Args) -> Option<Value> {
//!         match name {
//!             "name" => Some(Value::from(&self.name)),
//!             "priority" => Some(Value::from(self.priority)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let tasks = vec![
//!     Task { name: "Write docs".into(), priority: Some(3) },
//!     Task { name: "Triage".into(), priority: None },
//!     Task { name: "Fix bug".into(), priority: Some(5) },
//! ];
//!
//! let sorted = Sorter::new(&tasks)
//!     .attribute("priority")
//!     .descending()
//!     .sort()
//!     .unwrap();
//!
//! let names: Vec<&str> = sorted.iter().map(|t| t.name.as_str()).collect();
//! assert_eq!(names, ["Fix bug", "Write docs", "Triage"]);
//! ```
//!
//! # Pipeline Semantics
//!
//! Every item is run through the shaping steps once, producing its sort
//! key. Keys are then compared:
//!
//! ```text
//! nil vs nil       => equal
//! nil vs present   => decided by nil placement alone
//! present vs other => native order, or an Incomparable error
//! ```
//!
//! Direction reverses the present keys only, so `nils_last` holds whether
//! the sort ascends or descends. Ties keep their input order when
//! ascending.
//!
//! # Extraction
//!
//! | Step | Resolves against an item |
//! |------|--------------------------|
//! | `dig` | keyed lookup, then a call named after the segment, then the item's text |
//! | `call` | the named call, then the item's text |
//! | `upcase` / `downcase` | case of the text form |
//!
//! Items expose these capabilities through the [`Extract`] trait, which can
//! be derived with the `derive` feature.

mod config;
mod error;
mod ordering;
mod pipeline;
mod sorter;
mod step;
mod traits;
mod value;

// Re-export public API
pub use config::{PipelineConfig, SegmentConfig, StepConfig};
pub use error::{Result, SortError, Stage, StepError};
pub use ordering::{compare_values, compare_with_nils, Dir, Nils};
pub use pipeline::Pipeline;
pub use sorter::{Sortable, Sorter};
pub use step::{Case, Step};
pub use traits::{Args, Extract};
pub use value::{Key, Number, Value};

#[cfg(feature = "derive")]
pub use standout_sorter_macros::Extract;
