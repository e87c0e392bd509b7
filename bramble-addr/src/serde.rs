// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialization helpers switching between hex strings and raw bytes.
//!
//! Human-readable encodings (JSON) carry addresses as 40-character hex
//! strings, binary encodings (CBOR) carry the raw 20 bytes. Either form
//! decodes back to the same address.

use serde::{Deserialize, Serialize};
use serde_bytes::{ByteBuf as SerdeByteBuf, Bytes as SerdeBytes};

use crate::address::{Address, AddressError};
use crate::view::AddressView;

/// Helper method for `serde` to serialize bytes into a hex string when using a human readable
/// encoding (JSON), otherwise it serializes the bytes directly (CBOR).
pub fn serialize_hex<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if serializer.is_human_readable() {
        hex::serde::serialize(value, serializer)
    } else {
        SerdeBytes::new(value).serialize(serializer)
    }
}

/// Helper method for `serde` to deserialize from a hex string into bytes when using a human
/// readable encoding (JSON), otherwise it deserializes the bytes directly (CBOR).
pub fn deserialize_hex<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        hex::serde::deserialize(deserializer)
    } else {
        let bytes = <SerdeByteBuf>::deserialize(deserializer)?;
        Ok(bytes.to_vec())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_hex(self.as_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = deserialize_hex(deserializer)?;

        bytes
            .as_slice()
            .try_into()
            .map_err(|err: AddressError| serde::de::Error::custom(err.to_string()))
    }
}

// A view serializes exactly like the address it aliases; deserialization
// always needs an owning `Address` since there is no buffer to borrow from.
impl Serialize for AddressView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_hex(self.as_bytes(), serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use crate::address::Address;
    use crate::view::AddressView;

    use super::{deserialize_hex, serialize_hex};

    #[derive(Debug, Serialize, Deserialize)]
    struct Test(
        #[serde(serialize_with = "serialize_hex", deserialize_with = "deserialize_hex")] Vec<u8>,
    );

    #[test]
    fn serialize() {
        let mut bytes: Vec<u8> = Vec::new();
        let test = Test(vec![1, 2, 3]);

        // For CBOR the bytes just get serialized straight away as it is not a human readable
        // encoding
        ciborium::ser::into_writer(&test, &mut bytes).unwrap();
        assert_eq!(vec![67, 1, 2, 3], bytes);
    }

    #[test]
    fn deserialize() {
        let bytes: Vec<u8> = vec![67, 1, 2, 3];
        let test: Test = ciborium::de::from_reader(&bytes[..]).unwrap();
        assert_eq!(test.0, vec![1, 2, 3]);
    }

    #[test]
    fn serialize_address() {
        let address: Address = "28c55196f57753c40aceb6fb58617e6995a7eddb".parse().unwrap();

        // Serialize CBOR (non human-readable byte encoding)
        let mut bytes: Vec<u8> = Vec::new();
        ciborium::ser::into_writer(&address, &mut bytes).unwrap();
        assert_eq!(
            bytes,
            vec![
                84, 40, 197, 81, 150, 245, 119, 83, 196, 10, 206, 182, 251, 88, 97, 126, 105, 149,
                167, 237, 219
            ]
        );

        // Serialize JSON (human-readable hex encoding)
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"28c55196f57753c40aceb6fb58617e6995a7eddb\"");
    }

    #[test]
    fn deserialize_address() {
        // Deserialize CBOR (non human-readable byte encoding)
        let bytes = [
            84, 40, 197, 81, 150, 245, 119, 83, 196, 10, 206, 182, 251, 88, 97, 126, 105, 149, 167,
            237, 219,
        ];
        let address: Address = ciborium::de::from_reader(&bytes[..]).unwrap();
        assert_eq!(address.to_hex(), "28c55196f57753c40aceb6fb58617e6995a7eddb");

        // Deserialize JSON (human-readable hex encoding)
        let json = "\"28c55196f57753c40aceb6fb58617e6995a7eddb\"";
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(address.to_hex(), "28c55196f57753c40aceb6fb58617e6995a7eddb");
    }

    #[test]
    fn deserialize_wrong_length() {
        // 19-byte CBOR byte string
        let bytes = [
            83, 40, 197, 81, 150, 245, 119, 83, 196, 10, 206, 182, 251, 88, 97, 126, 105, 149, 167,
            237,
        ];
        let result = ciborium::de::from_reader::<Address, _>(&bytes[..]);
        assert!(result.is_err());

        // 38-character JSON hex string
        let json = "\"28c55196f57753c40aceb6fb58617e6995a7ed\"";
        let result = serde_json::from_str::<Address>(json);
        assert!(result.is_err());
    }

    #[test]
    fn view_serializes_like_owned() {
        let address: Address = "28c55196f57753c40aceb6fb58617e6995a7eddb".parse().unwrap();
        let view = AddressView::from(&address);

        let mut address_bytes: Vec<u8> = Vec::new();
        ciborium::ser::into_writer(&address, &mut address_bytes).unwrap();
        let mut view_bytes: Vec<u8> = Vec::new();
        ciborium::ser::into_writer(&view, &mut view_bytes).unwrap();
        assert_eq!(address_bytes, view_bytes);

        assert_eq!(
            serde_json::to_string(&view).unwrap(),
            serde_json::to_string(&address).unwrap()
        );
    }
}
