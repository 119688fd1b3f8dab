//! Target-independent primitives shared by the driver crate.
//!
//! Nothing in here touches hardware: the types only build on
//! `core::sync::atomic`, so they can be used both from interrupt handlers
//! and from the main loop.

#![cfg_attr(not(test), no_std)]

pub mod sync;

pub use sync::RequestFlag;
