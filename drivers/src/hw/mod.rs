//! Raw register maps.
//!
//! Base addresses, offsets and bit definitions only. No logic lives here;
//! the drivers in [`crate::platform`] consume these tables.

pub mod tm4c1294;
