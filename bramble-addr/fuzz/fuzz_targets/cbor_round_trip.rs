#![no_main]

use bramble_addr::Address;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|address: Address| {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(&address, &mut bytes).unwrap();

    let address_again: Address = ciborium::de::from_reader(&bytes[..]).unwrap();
    assert_eq!(address, address_again);
});
