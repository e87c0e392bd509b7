// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cmp::Ordering;
use std::fmt;
use std::ops::BitXor;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::OsRng;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Size of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Size of an address in bits.
pub const ADDRESS_BITS: usize = ADDRESS_LEN * 8;

/// 20-byte address interpreted as a big-endian unsigned 160-bit integer.
///
/// Addresses are plain values: cheap to copy, immutable after construction
/// and safe to share across threads. Ordering, XOR distance and bit queries
/// all follow the big-endian numeric interpretation regardless of host byte
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address, the identity element of the XOR metric.
    pub const ZERO: Address = Address([0; ADDRESS_LEN]);

    /// Create an `Address` from its raw bytes representation.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an `Address` from the first 20 bytes of `bytes`.
    ///
    /// Anything past the address length is ignored, which matches the wire
    /// layout where an address is followed by further payload. Buffers
    /// shorter than 20 bytes are rejected before any read.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        match bytes.first_chunk::<ADDRESS_LEN>() {
            Some(head) => Ok(Self(*head)),
            None => Err(AddressError::InvalidLength(bytes.len(), ADDRESS_LEN)),
        }
    }

    /// Derive the address of the provided bytes.
    ///
    /// Computes RIPEMD-160 over SHA-256, the usual account-address
    /// derivation. The hash primitives themselves live in the `sha2` and
    /// `ripemd` crates; this type only adopts their 20-byte output.
    pub fn digest(buf: impl AsRef<[u8]>) -> Self {
        let sha = Sha256::digest(buf.as_ref());
        Self(Ripemd160::digest(sha).into())
    }

    /// Generate a uniformly random address from the operating system
    /// generator.
    pub fn random() -> Self {
        let mut rng = OsRng;
        Self::from_rng(&mut rng)
    }

    /// Generate a uniformly random address from the provided generator.
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0; ADDRESS_LEN];
        rng.fill(&mut bytes[..]);
        Self(bytes)
    }

    /// Bytes of the address, without copying.
    ///
    /// The returned reference borrows from this value and cannot outlive it.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Owned copy of the raw bytes, in big-endian on-the-wire layout.
    pub const fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    /// Copy the raw 20 bytes into the front of `buf`.
    ///
    /// Fails without writing anything when `buf` is shorter than an address.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<(), AddressError> {
        match buf.first_chunk_mut::<ADDRESS_LEN>() {
            Some(head) => {
                *head = self.0;
                Ok(())
            }
            None => Err(AddressError::InvalidLength(buf.len(), ADDRESS_LEN)),
        }
    }

    /// Convert the address to a 40-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bitwise exclusive-or of all 160 bits.
    pub fn xor(&self, other: &Address) -> Address {
        Address(xor_words(&self.0, &other.0))
    }

    /// XOR distance between two addresses.
    ///
    /// A numerically smaller result means the addresses are closer.
    pub fn distance(&self, other: &Address) -> Address {
        self.xor(other)
    }

    /// Index of the most-significant set bit (0–159), `None` for the
    /// all-zero address.
    pub fn log2(&self) -> Option<u32> {
        log2_words(&self.0)
    }

    /// Routing bucket for `other` relative to this address, `None` when the
    /// two addresses are equal.
    pub fn bucket_index(&self, other: &Address) -> Option<u32> {
        self.distance(other).log2()
    }

    /// Whether the bit at `index` is set, counting from the
    /// least-significant bit of the last byte.
    pub fn bit(&self, index: usize) -> Result<bool, AddressError> {
        test_bit(&self.0, index)
    }
}

/// Big-endian 64/64/32-bit chunks of an address.
///
/// All numeric operations go through these words instead of looping over
/// single bytes; loading with explicit byte-order conversions keeps the
/// semantics identical on little- and big-endian hosts.
#[inline]
pub(crate) fn be_words(bytes: &[u8; ADDRESS_LEN]) -> (u64, u64, u32) {
    let hi = u64::from_be_bytes(bytes[0..8].try_into().expect("chunk is 8 bytes"));
    let mid = u64::from_be_bytes(bytes[8..16].try_into().expect("chunk is 8 bytes"));
    let lo = u32::from_be_bytes(bytes[16..20].try_into().expect("chunk is 4 bytes"));
    (hi, mid, lo)
}

#[inline]
fn from_be_words(hi: u64, mid: u64, lo: u32) -> [u8; ADDRESS_LEN] {
    let mut bytes = [0; ADDRESS_LEN];
    bytes[0..8].copy_from_slice(&hi.to_be_bytes());
    bytes[8..16].copy_from_slice(&mid.to_be_bytes());
    bytes[16..20].copy_from_slice(&lo.to_be_bytes());
    bytes
}

#[inline]
pub(crate) fn cmp_words(a: &[u8; ADDRESS_LEN], b: &[u8; ADDRESS_LEN]) -> Ordering {
    let (a_hi, a_mid, a_lo) = be_words(a);
    let (b_hi, b_mid, b_lo) = be_words(b);
    a_hi.cmp(&b_hi)
        .then_with(|| a_mid.cmp(&b_mid))
        .then_with(|| a_lo.cmp(&b_lo))
}

#[inline]
pub(crate) fn xor_words(a: &[u8; ADDRESS_LEN], b: &[u8; ADDRESS_LEN]) -> [u8; ADDRESS_LEN] {
    let (a_hi, a_mid, a_lo) = be_words(a);
    let (b_hi, b_mid, b_lo) = be_words(b);
    from_be_words(a_hi ^ b_hi, a_mid ^ b_mid, a_lo ^ b_lo)
}

// Chunk boundaries sit at global bit indices 159, 95 and 31.
#[inline]
pub(crate) fn log2_words(bytes: &[u8; ADDRESS_LEN]) -> Option<u32> {
    let (hi, mid, lo) = be_words(bytes);
    if hi != 0 {
        Some(159 - hi.leading_zeros())
    } else if mid != 0 {
        Some(95 - mid.leading_zeros())
    } else if lo != 0 {
        Some(31 - lo.leading_zeros())
    } else {
        None
    }
}

#[inline]
pub(crate) fn test_bit(bytes: &[u8; ADDRESS_LEN], index: usize) -> Result<bool, AddressError> {
    if index >= ADDRESS_BITS {
        return Err(AddressError::BitOutOfRange(index));
    }
    Ok(bytes[ADDRESS_LEN - 1 - index / 8] & (1 << (index % 8)) != 0)
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_LEN] {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl From<&[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: &[u8; ADDRESS_LEN]) -> Self {
        Self(*bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let value_len = value.len();

        let checked_value: [u8; ADDRESS_LEN] = value
            .try_into()
            .map_err(|_| AddressError::InvalidLength(value_len, ADDRESS_LEN))?;

        Ok(Self(checked_value))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(hex::decode(value)?.as_slice())
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_words(&self.0, &other.0)
    }
}

impl BitXor for Address {
    type Output = Address;

    fn bitxor(self, rhs: Address) -> Address {
        self.xor(&rhs)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Error types for `Address` struct.
#[derive(Error, Debug)]
pub enum AddressError {
    /// Byte buffer has an invalid length.
    #[error("invalid address length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    /// Address string contains invalid hexadecimal characters.
    #[error("invalid hex encoding in address string")]
    InvalidHexEncoding(#[from] hex::FromHexError),

    /// Bit index lies outside the 160-bit range.
    #[error("bit index {0} out of range, expected 0..160")]
    BitOutOfRange(usize),
}
