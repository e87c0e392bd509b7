// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cmp::Ordering;
use std::fmt;
use std::ops::BitXor;

use crate::address::{
    ADDRESS_LEN, Address, AddressError, cmp_words, log2_words, test_bit, xor_words,
};

/// Read-only view of an address aliased onto caller-owned memory.
///
/// Overlaying avoids the copy on hot lookup paths that already hold the
/// bytes in a packet or storage buffer. The view borrows the buffer for its
/// whole lifetime, so the backing memory cannot be dropped or mutated while
/// the view is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressView<'a>(&'a [u8; ADDRESS_LEN]);

impl<'a> AddressView<'a> {
    pub const fn new(bytes: &'a [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &'a [u8; ADDRESS_LEN] {
        self.0
    }

    /// Promote the view to an owning `Address` by copying the bytes.
    pub fn to_address(&self) -> Address {
        Address::from_bytes(*self.0)
    }

    /// Bitwise exclusive-or of all 160 bits, yielding an owned address.
    pub fn xor(&self, other: &AddressView<'_>) -> Address {
        Address::from_bytes(xor_words(self.0, other.0))
    }

    /// Index of the most-significant set bit, `None` for all-zero bytes.
    pub fn log2(&self) -> Option<u32> {
        log2_words(self.0)
    }

    /// Whether the bit at `index` is set, counting from the
    /// least-significant bit of the last byte.
    pub fn bit(&self, index: usize) -> Result<bool, AddressError> {
        test_bit(self.0, index)
    }
}

impl<'a> TryFrom<&'a [u8]> for AddressView<'a> {
    type Error = AddressError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        match value.first_chunk::<ADDRESS_LEN>() {
            Some(head) => Ok(Self(head)),
            None => Err(AddressError::InvalidLength(value.len(), ADDRESS_LEN)),
        }
    }
}

impl<'a> From<&'a Address> for AddressView<'a> {
    fn from(address: &'a Address) -> Self {
        Self(address.as_bytes())
    }
}

impl PartialEq<Address> for AddressView<'_> {
    fn eq(&self, other: &Address) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<AddressView<'_>> for Address {
    fn eq(&self, other: &AddressView<'_>) -> bool {
        self.as_bytes() == other.0
    }
}

impl PartialOrd for AddressView<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AddressView<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_words(self.0, other.0)
    }
}

impl BitXor for AddressView<'_> {
    type Output = Address;

    fn bitxor(self, rhs: Self) -> Address {
        self.xor(&rhs)
    }
}

impl fmt::Display for AddressView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use crate::address::{Address, AddressError};

    use super::AddressView;

    #[test]
    fn overlay_on_buffer() {
        let buf: Vec<u8> = (0..32).collect();
        let view = AddressView::try_from(&buf[..]).unwrap();
        assert_eq!(&view.as_bytes()[..], &buf[..20]);
        assert_eq!(view.to_address(), Address::from_slice(&buf).unwrap());
    }

    #[test]
    fn short_buffer_rejected() {
        let buf = [0u8; 10];
        let result = AddressView::try_from(&buf[..]);
        assert!(matches!(result, Err(AddressError::InvalidLength(10, 20))));
    }

    #[test]
    fn matches_owned_semantics() {
        let a: Address = "28c55196f57753c40aceb6fb58617e6995a7eddb".parse().unwrap();
        let b: Address = "b851474b74f65cd19f981c723590e3e520242b97".parse().unwrap();
        let view_a = AddressView::from(&a);
        let view_b = AddressView::from(&b);

        assert_eq!(view_a.xor(&view_b), a.xor(&b));
        assert_eq!(view_a ^ view_b, a ^ b);
        assert_eq!(view_a.log2(), a.log2());
        assert_eq!(view_a.bit(0).unwrap(), a.bit(0).unwrap());
        assert_eq!(view_a.cmp(&view_b), a.cmp(&b));
        assert_eq!(view_a.to_string(), a.to_string());

        assert_eq!(view_a, a);
        assert_eq!(a, view_a);
        assert_ne!(view_a, view_b);
    }
}
