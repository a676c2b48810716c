//! # System Interaction Layer
//!
//! The boundary between the workflow logic and the operating system.
//!
//! - **`executor`**: spawns external processes from shlex-parsed command
//!   lines, with platform-specific fallbacks and a `CommandRunner` seam so
//!   tests can record commands instead of running them.
//! - **`git`**: typed helpers for every `git`/`gh` invocation the workflow
//!   performs, built on top of the executor.

pub mod executor;
pub mod git;
