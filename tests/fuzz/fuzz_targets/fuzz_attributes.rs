#![no_main]
use bmp_decoder::models::AsnLength;
use bmp_decoder::parser::bgp::attributes::parse_attributes;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let _ = parse_attributes(bytes.clone(), AsnLength::Bits16);
    let _ = parse_attributes(bytes, AsnLength::Bits32);
});
