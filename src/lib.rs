//! # Parking Lots
//!
//! Occupancy tracking for a fixed set of named parking lots, persisted to a
//! flat `name,capacity,occupied` text file.
//!
//! ## Design Principles
//!
//! - **Position is the key**: lots are addressed by their place in the file,
//!   names may repeat
//! - **No-op on failure**: a refused reserve or cancel never touches state
//! - **Lenient loading**: malformed lines are skipped, an empty or missing
//!   file yields the default lots
//! - **Save after every change**: the whole collection is rewritten
//!
//! ## Example
//!
//! ```no_run
//! use parking_lots::{codec, LotCollection};
//!
//! let mut lots = codec::load("parqueos.csv").unwrap();
//! if lots.reserve(0) {
//!     codec::save("parqueos.csv", &lots).unwrap();
//! }
//! assert_eq!(LotCollection::reset().len(), 4);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod lot;
pub mod session;
pub mod store;
pub mod table;

pub use codec::{load, save};
pub use config::Config;
pub use error::{LotError, Rejection, Result};
pub use lot::Lot;
pub use session::Session;
pub use store::LotCollection;
