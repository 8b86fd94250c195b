//! Tidings Test - Shared test utilities for Tidings.
//!
//! This crate provides recording callbacks, fixtures and harness helpers that
//! can be used across the Tidings crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tidings-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust
//! use tidings_events::Dispatcher;
//! use tidings_test::Recorder;
//!
//! let dispatcher = Dispatcher::new();
//! let recorder = Recorder::new();
//!
//! dispatcher.subscribe("ping", &recorder.callback("first"));
//! dispatcher.emit_args("ping", ["a", "b"]).unwrap();
//!
//! assert_eq!(recorder.labels(), vec!["first"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
