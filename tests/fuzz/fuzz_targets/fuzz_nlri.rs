#![no_main]
use bmp_decoder::models::Afi;
use bmp_decoder::parser::utils::parse_nlri_list;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let _ = parse_nlri_list(bytes.clone(), false, &Afi::Ipv4);
    let _ = parse_nlri_list(bytes, true, &Afi::Ipv6);
});
