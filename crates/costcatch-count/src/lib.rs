//! # CostCatch Count
//!
//! The quick-count session engine: everything between "start counting"
//! and a saved inventory count.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Quick Count Session Flow                            │
//! │                                                                         │
//! │  UI Action               Session Engine             Storage             │
//! │  ─────────               ──────────────             ───────             │
//! │                                                                         │
//! │  Tap item ──────────────► begin_entry()                                 │
//! │  Tap number pad ────────► QuantityEntry (entry.rs)                      │
//! │  Tap confirm ───────────► commit_entry() ──► quantities map             │
//! │  Tap submit ────────────► submit_count() ──► CountStore::create_count() │
//! │                               │  (submit.rs)        (one transaction)   │
//! │                               ▼                                         │
//! │                           SessionContext notifier (context.rs)          │
//! │                                                                         │
//! │  NOTE: prices are frozen into the submission at build time, so a        │
//! │        price edit mid-count never skews already-entered lines.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session itself ([`CountSession`]) is synchronous and pure; only
//! the submission driver is async, and only because storage is.

pub mod context;
pub mod entry;
pub mod session;
pub mod state;
pub mod submit;

pub use context::{Notify, SessionContext, SilentNotify};
pub use entry::QuantityEntry;
pub use session::{CountSession, SessionError, SessionPhase};
pub use state::SessionState;
pub use submit::{submit_count, CountStore, StoreError, SubmitError};
