//! Multi-step operations built from single commands.
//!
//! # Data Flow
//! ```text
//! handler
//!     → workflow (ordered steps, each awaiting the previous result)
//!         → CommandProxy::run → CommandResult
//!         → inspect result → next request, or short-circuit
//! ```
//!
//! # Failure Policy
//! - `block` and `mining` abort on the first failing step and return that
//!   step's own error detail
//! - `summary` tolerates per-block failures and omits those heights

pub mod block;
pub mod mining;
pub mod summary;

pub use block::block_by_id;
pub use mining::{mine_to_address, MiningOutcome};
pub use summary::{recent_blocks, BlockSummary, MAX_RECENT_BLOCKS};
