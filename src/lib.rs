//! gentrack - per-generation call-frequency profiler
//!
//! Wrap functions and constructors in counting proxies, close generations
//! with [`Tracker::tick`], and dump the count history of each unit category
//! as CSV or as a fixed-width table.
//!
//! ```
//! use gentrack::{DumpOptions, Tracker, UnitKind};
//!
//! let tracker = Tracker::new();
//! let f = tracker.track_fn("f", |x: u32| x * 2);
//!
//! f.call((1,));
//! f.call((2,));
//! tracker.tick();
//!
//! let csv = tracker.render(UnitKind::Callable, &DumpOptions::default());
//! assert_eq!(csv, "Gen,f\n0,2\n");
//! ```

pub mod cli;
pub mod csv_output;
pub mod dump;
pub mod error;
pub mod invoke;
pub mod matrix;
pub mod snapshot;
pub mod summary;
pub mod table_output;
pub mod tracker;
pub mod unit;

pub use dump::{DumpOptions, DumpReport, Format};
pub use error::DumpError;
pub use invoke::{Construct, Invoke};
pub use matrix::{CountMatrix, UnitTotal};
pub use snapshot::Snapshot;
pub use tracker::Tracker;
pub use unit::{Tracked, TypeConstructor, UnitKind};
