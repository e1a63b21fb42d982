/*!
bmp-decoder is a decoder for BGP Monitoring Protocol (BMP) version 1 messages.

BMP v1 messages have no length field. The decoder therefore works incrementally: a [BmpMessage]
announces how many bytes it needs next and consumes exactly that many per step, dispatching on
the message type found in the 44-byte common header. Supported message types are route
monitoring (with the embedded BGP UPDATE), statistics reports, and peer down notifications
(with the optional BGP NOTIFICATION).

# Examples

## Decode a stream

[BmpParser] drives the decoder over anything implementing [std::io::Read], such as a file or a
TCP connection from a router.

```no_run
use bmp_decoder::BmpParser;

let stream = std::net::TcpStream::connect("192.0.2.1:1790").unwrap();
for msg in BmpParser::new(stream) {
    println!("{}", msg);
}
```

## Drive the decoder by hand

```
use bmp_decoder::{BmpMessage, MessageBody};

let mut header = vec![1, 2, 0, 0];
header.extend([0u8; 40]);

let mut msg = BmpMessage::new();
assert_eq!(msg.next_expected_length(), 44);
assert!(!msg.consume(&header).unwrap());
assert_eq!(msg.next_expected_length(), 1);
assert!(msg.consume(&[2]).unwrap());

match msg.body() {
    Some(MessageBody::PeerDownNotification(n)) => assert!(n.notification.is_none()),
    _ => unreachable!(),
}
```

## Plug in a BGP decoder

Embedded BGP messages are decoded through the [BgpDecoder] trait. [BmpMessage::consume] uses
[DefaultBgpDecoder]; [BmpMessage::consume_with] accepts any other implementation.

# Features

- `local` (default): [BmpParser::from_path] reading local, optionally compressed, files.
- `serde`: `Serialize`/`Deserialize` for all decoded structures.
- `cli`: the `bmp-decoder` command line tool.
*/

pub mod error;
pub mod models;
pub mod parser;

pub use error::ParserError;
pub use parser::bmp::messages::*;
pub use parser::iters::{BmpMessageIterator, FallibleBmpMessageIterator};
pub use parser::{BgpDecoder, BmpMessage, BmpParser, BmpState, DefaultBgpDecoder, ParserBmpError};
