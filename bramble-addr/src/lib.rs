// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-width 160-bit addresses for ledger accounts and peer routing.
//!
//! An [`Address`] is an opaque 20-byte identity for equality and hashing, a
//! big-endian unsigned integer for ordering and bit-level queries, and a
//! point in the XOR metric space used by distance-based routing tables.

pub mod address;
pub mod serde;
pub mod view;

pub use address::{ADDRESS_BITS, ADDRESS_LEN, Address, AddressError};
pub use view::AddressView;
