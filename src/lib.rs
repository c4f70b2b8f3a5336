//! # Lineage
//!
//! An in-memory genealogy index: people and parent/child relations are loaded
//! into an open-addressing hash table, then queried for descendants and
//! ancestors.
//!
//! The crate is built from two layers:
//!
//! - `ProbingHashtable`: a fixed-capacity, open-addressing table whose probing
//!   strategy (`ProbingFunction`) and hash function (`KeyHasher`) are injected
//!   at construction
//! - `GraphBuilder` / `descendants`: person records indexed by id in that table,
//!   and a cycle-safe depth-first walk over them
//!
//! ## Basic Usage
//!
//! ```rust
//! use lineage::{build, descendants};
//!
//! let people = [(1, "John"), (2, "Alice"), (3, "Bob")];
//! let relations = [(1, 2), (2, 3), (3, 1)];
//!
//! let table = build(&people, &relations)?;
//!
//! assert_eq!(table.lookup(&2).map(|p| p.name.as_str()), Some("Alice"));
//! assert_eq!(descendants(&table, 1), Some(vec![2, 3]));
//! assert_eq!(descendants(&table, 4), None);
//! # Ok::<(), lineage::TableError>(())
//! ```
//!
//! ## Using the table directly
//!
//! ```rust
//! use lineage::{ProbingHashtable, QuadraticProbing, StdHash};
//!
//! let mut table: ProbingHashtable<&str, u32, QuadraticProbing, StdHash> =
//!     ProbingHashtable::empty(16, QuadraticProbing, StdHash)?;
//!
//! // `insert` reports whether the key was new; size bookkeeping is up to the caller
//! if table.insert("apple", 1)?.is_none() {
//!     table.record_insertion();
//! }
//! assert_eq!(table.insert("apple", 10)?, Some(1));
//!
//! assert_eq!(table.lookup(&"apple"), Some(&10));
//! assert_eq!(table.len(), 1);
//! # Ok::<(), lineage::TableError>(())
//! ```

/// Sizing constants and configuration for genealogy tables
mod config;
/// Error types
mod error;
/// Building the genealogy table from people and relations
mod graph_builder;
/// Injectable hash functions
mod key_hash;
/// Logger initialisation
mod logger;
/// Person records
mod person;
/// Probing strategies
mod probing;
/// The open-addressing hash table
mod probing_hashtable;
/// Descendant and ancestor queries
mod traversal;

pub use config::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD, GraphConfig};
pub use error::TableError;
pub use graph_builder::{GraphBuilder, PersonTable, build};
pub use key_hash::{IdentityHash, KeyHasher, StdHash};
pub use logger::initialize_logger;
pub use person::{Person, PersonId};
pub use probing::{LinearProbing, ProbingFunction, QuadraticProbing, StridedProbing, home_slot};
pub use probing_hashtable::{Iter, ProbingHashtable};
pub use traversal::{ancestors, descendants};
