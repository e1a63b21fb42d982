#![no_main]
use bmp_decoder::{BmpMessage, BmpParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Drive the state machine by hand, chunk by chunk
    let mut msg = BmpMessage::new();
    let mut rest = data;
    loop {
        let len = msg.next_expected_length();
        if rest.len() < len {
            break;
        }
        let (chunk, tail) = rest.split_at(len);
        rest = tail;
        match msg.consume(chunk) {
            Ok(false) => continue,
            Ok(true) | Err(_) => break,
        }
    }

    // Same bytes as a stream of messages
    let _ = BmpParser::new(data).into_fallible_message_iter().count();
});
