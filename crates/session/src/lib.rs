//! Session layer for the basket comparison page.
//!
//! The aggregation crates are pure; this crate supplies the state and
//! timing rules around them:
//!
//! - [`basket`]: basket lines, store selection and the price matrix, with
//!   the invalidate-on-change lifecycle
//! - [`generation`]: request generations, so stale responses are discarded
//!   instead of committed
//! - [`debounce`]: the cancellable timer used to coalesce rapid changes
//!   into one request (search ~350 ms, price lookup ~800 ms, both from
//!   configuration)
//!
//! There is no locking here because there is no parallel computation; the
//! correctness story is purely "discard stale results, recompute from
//! current inputs".

pub mod basket;
pub mod debounce;
pub mod generation;

pub use basket::{BasketSession, LookupRequest};
pub use debounce::Debouncer;
pub use generation::GenerationCounter;
