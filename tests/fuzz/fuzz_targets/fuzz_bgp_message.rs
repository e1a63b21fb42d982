#![no_main]
use bmp_decoder::{BgpDecoder, DefaultBgpDecoder};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    let decoder = DefaultBgpDecoder;
    let _ = decoder.decode_update(bytes.clone(), false);
    let _ = decoder.decode_update(bytes.clone(), true);
    let _ = decoder.decode_notification(bytes);
});
