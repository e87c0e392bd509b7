#![no_main]

use bramble_addr::Address;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(address) = Address::from_slice(data) {
        let address_again: Address = address.to_hex().parse().unwrap();
        assert_eq!(address, address_again);
    }
});
