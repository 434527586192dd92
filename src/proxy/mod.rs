//! Command proxy subsystem.
//!
//! # Data Flow
//! ```text
//! handler / workflow
//!     → command.rs (CommandRequest → argv, deadline)
//!     → invoker.rs (spawn, capture, kill on deadline) → RawOutcome
//!     → decoder.rs (JSON first, trimmed text fallback) → CommandResult
//! ```
//!
//! # Design Decisions
//! - Nothing below the gateway surface returns `Err`; failures are the
//!   `CommandResult::Failed` variant
//! - Process spawning sits behind a trait so workflows run against fakes
//! - No retries, no caching: one request, one process

pub mod command;
pub mod decoder;
pub mod invoker;

pub use command::{CommandProxy, CommandRequest};
pub use decoder::{decode, CommandError, CommandResult, ErrorKind};
pub use invoker::{ProcessInvoker, RawOutcome, SystemInvoker};
