//! Generation-based invocation tracker
//!
//! A [`Tracker`] hands out counting proxies for callables and
//! constructor-style units, closes generations with [`Tracker::tick`], and
//! dumps the accumulated history as two artifacts (one per unit category).
//!
//! Names are the identity of a unit. Registering two units under the same
//! name merges their counts; the name also appears twice in its category's
//! column list.

use crate::dump::{self, DumpOptions, DumpReport, Format};
use crate::error::Result;
use crate::invoke::{short_type_name, Construct};
use crate::matrix::CountMatrix;
use crate::snapshot::Snapshot;
use crate::unit::{Tracked, TypeConstructor, UnitKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id handed to a tracker created without one; starts at 0, never reset
static NEXT_TRACKER_ID: AtomicU64 = AtomicU64::new(0);

fn next_tracker_id() -> u64 {
    NEXT_TRACKER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Registration lists, live counts and closed generations of one tracker
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    callables: Vec<String>,
    constructors: Vec<String>,
    current: HashMap<String, u64>,
    history: Vec<Snapshot>,
}

impl Ledger {
    /// Register `name`; returns false if the name was already known
    fn register(&mut self, name: &str, kind: UnitKind) -> bool {
        let known = self.current.contains_key(name)
            || self.callables.iter().chain(&self.constructors).any(|n| n == name);

        match kind {
            UnitKind::Callable => self.callables.push(name.to_string()),
            UnitKind::Constructor => self.constructors.push(name.to_string()),
        }
        self.current.entry(name.to_string()).or_insert(0);

        !known
    }

    /// Count one invocation of `name` in the current generation
    pub(crate) fn bump(&mut self, name: &str) {
        match self.current.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.current.insert(name.to_string(), 1);
            }
        }
    }

    fn tick(&mut self) {
        let fresh = self
            .callables
            .iter()
            .chain(&self.constructors)
            .map(|name| (name.clone(), 0))
            .collect();
        let closed = std::mem::replace(&mut self.current, fresh);
        self.history.push(Snapshot::new(closed));
    }

    fn names(&self, kind: UnitKind) -> &[String] {
        match kind {
            UnitKind::Callable => &self.callables,
            UnitKind::Constructor => &self.constructors,
        }
    }
}

/// Counts invocations of registered units per generation
#[derive(Debug)]
pub struct Tracker {
    id: u64,
    ledger: Rc<RefCell<Ledger>>,
}

impl Tracker {
    /// Create a tracker with the next process-wide id
    pub fn new() -> Self {
        Self::with_id(next_tracker_id())
    }

    /// Create a tracker with an explicit id
    ///
    /// The id only namespaces artifact file names; two trackers sharing an
    /// id overwrite each other's artifacts.
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ledger: Rc::new(RefCell::new(Ledger::default())),
        }
    }

    /// Id used to namespace this tracker's artifact files
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Register `unit` under `name` and return its counting proxy
    ///
    /// Re-registering a name is allowed. Both registrations share one
    /// counter and the name appears once per registration in the dump.
    pub fn track<F>(&self, name: impl Into<String>, unit: F, kind: UnitKind) -> Tracked<F> {
        let name: String = name.into();
        let fresh = self.ledger.borrow_mut().register(&name, kind);

        if fresh {
            tracing::debug!(tracker = self.id, unit = %name, %kind, "registered unit");
        } else {
            tracing::warn!(
                tracker = self.id,
                unit = %name,
                %kind,
                "unit name registered twice; counts will be merged"
            );
        }

        Tracked::new(Rc::from(name), kind, unit, Rc::clone(&self.ledger))
    }

    /// Register a plain function or closure
    pub fn track_fn<F>(&self, name: impl Into<String>, f: F) -> Tracked<F> {
        self.track(name, f, UnitKind::Callable)
    }

    /// Register a constructor-style unit
    pub fn track_constructor<F>(&self, name: impl Into<String>, ctor: F) -> Tracked<F> {
        self.track(name, ctor, UnitKind::Constructor)
    }

    /// Register `T`'s [`Construct`] impl, named after the type
    ///
    /// The name is the last path segment of the type name with generic
    /// arguments removed, e.g. `Node` for `my_crate::graph::Node<u32>`.
    pub fn track_type<T>(&self) -> Tracked<TypeConstructor<T>>
    where
        T: Construct<()>,
    {
        self.track_type_with::<T, ()>()
    }

    /// Like [`Tracker::track_type`], for a constructor taking `Args`
    pub fn track_type_with<T, Args>(&self) -> Tracked<TypeConstructor<T>>
    where
        T: Construct<Args>,
    {
        self.track(
            short_type_name::<T>(),
            TypeConstructor::new(),
            UnitKind::Constructor,
        )
    }

    /// Close the current generation
    ///
    /// The live counts are appended to the history unchanged, then every
    /// registered identifier restarts at zero.
    pub fn tick(&self) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.tick();
        tracing::debug!(
            tracker = self.id,
            generation = ledger.history.len() - 1,
            "generation closed"
        );
    }

    /// Number of completed generations
    pub fn generations(&self) -> usize {
        self.ledger.borrow().history.len()
    }

    /// Copy of every completed generation, oldest first
    pub fn history(&self) -> Vec<Snapshot> {
        self.ledger.borrow().history.clone()
    }

    /// Copy of one completed generation
    pub fn snapshot(&self, generation: usize) -> Option<Snapshot> {
        self.ledger.borrow().history.get(generation).cloned()
    }

    /// Live count for `name` in the open generation
    pub fn current_count(&self, name: &str) -> u64 {
        self.ledger.borrow().current.get(name).copied().unwrap_or(0)
    }

    /// Registered identifiers of one category, in registration order
    pub fn names(&self, kind: UnitKind) -> Vec<String> {
        self.ledger.borrow().names(kind).to_vec()
    }

    /// Registered plain-callable identifiers, in registration order
    pub fn callable_names(&self) -> Vec<String> {
        self.names(UnitKind::Callable)
    }

    /// Registered constructor-style identifiers, in registration order
    pub fn constructor_names(&self) -> Vec<String> {
        self.names(UnitKind::Constructor)
    }

    /// Count matrix for one category over the completed generations
    pub fn matrix(&self, kind: UnitKind, generation_column: &str) -> CountMatrix {
        let ledger = self.ledger.borrow();
        CountMatrix::from_history(generation_column, ledger.names(kind), &ledger.history)
    }

    /// Render one category's artifact in memory
    pub fn render(&self, kind: UnitKind, options: &DumpOptions) -> String {
        dump::render(&self.matrix(kind, &options.generation_column), options.format)
    }

    /// Write both artifacts under `dir`
    ///
    /// Files are named `<id>-<artifact>.<ext>` and overwritten if present.
    /// The callable artifact is written first; if it fails the constructor
    /// artifact is not attempted.
    pub fn dump(&self, dir: impl AsRef<Path>, options: &DumpOptions) -> Result<DumpReport> {
        let dir = dir.as_ref();

        let callable_path =
            dump::artifact_path(dir, self.id, &options.callable_artifact, options.format);
        dump::write_artifact(&callable_path, &self.render(UnitKind::Callable, options))?;

        let constructor_path =
            dump::artifact_path(dir, self.id, &options.constructor_artifact, options.format);
        dump::write_artifact(&constructor_path, &self.render(UnitKind::Constructor, options))?;

        Ok(DumpReport {
            callable_path,
            constructor_path,
            generations: self.generations(),
        })
    }

    /// Dump with default artifact names, parsing `format` first
    ///
    /// An unknown format fails before any file is touched.
    pub fn dump_as(&self, dir: impl AsRef<Path>, format: &str) -> Result<DumpReport> {
        let format: Format = format.parse()?;
        self.dump(dir, &DumpOptions::with_format(format))
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
