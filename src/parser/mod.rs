/*!
Provides the BMP stream parser that drives [BmpMessage] decoding over any [Read] source.
*/
use std::io::{self, Read};

pub mod bgp;
pub mod bmp;
pub mod iters;
pub mod utils;

pub(crate) use self::utils::*;

pub use crate::error::ParserError;
pub use bgp::{BgpDecoder, DefaultBgpDecoder};
pub use bmp::{BmpMessage, BmpState, ParserBmpError};

use log::{debug, error};

/// File the raw bytes of a failed message are written to when core dumps are enabled.
pub const CORE_DUMP_FILE: &str = "bmp_core_dump";

pub struct BmpParser<R> {
    reader: R,
    core_dump: bool,
    options: ParserOptions,
}

pub(crate) struct ParserOptions {
    show_warnings: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            show_warnings: true,
        }
    }
}

#[cfg(feature = "oneio")]
impl BmpParser<Box<dyn Read + Send>> {
    /// Creating a new parser from a local file path. Compressed files (gz, bz2) are decompressed
    /// on the fly.
    pub fn from_path(path: &str) -> Result<Self, ParserBmpError> {
        let reader = oneio::get_reader(path)?;
        Ok(BmpParser::new(reader))
    }
}

impl<R> BmpParser<R> {
    /// Creating a new parser from a object that implements [Read] trait, e.g. a TCP stream
    /// from a router.
    pub fn new(reader: R) -> Self {
        BmpParser {
            reader,
            core_dump: false,
            options: ParserOptions::default(),
        }
    }

    /// Write the bytes of a message that fails to decode to [CORE_DUMP_FILE].
    pub fn enable_core_dump(self) -> BmpParser<R> {
        BmpParser {
            core_dump: true,
            ..self
        }
    }

    pub fn disable_warnings(self) -> BmpParser<R> {
        let mut options = self.options;
        options.show_warnings = false;
        BmpParser { options, ..self }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> BmpParser<R> {
    /// Read and decode the next message.
    ///
    /// Returns `Ok(None)` if the stream ends cleanly between two messages. Ending in the middle
    /// of a message is a [ParserBmpError::TruncatedMessage].
    pub fn next_message(&mut self) -> Result<Option<BmpMessage>, ParserBmpError> {
        let mut msg = BmpMessage::new();
        let mut buf = Vec::with_capacity(bmp::BMP_HEADER_LEN);
        loop {
            let expected = msg.next_expected_length();
            buf.resize(expected, 0);
            let read = match read_chunk(&mut self.reader, &mut buf) {
                Ok(read) => read,
                Err(e) => {
                    self.write_core_dump(&msg, &[]);
                    return Err(e.into());
                }
            };
            if read < expected {
                if read == 0 && msg.state() == &BmpState::Init {
                    debug!("reached end of BMP stream");
                    return Ok(None);
                }
                self.write_core_dump(&msg, &buf[..read]);
                return Err(ParserBmpError::TruncatedMessage { expected, read });
            }

            match msg.consume(&buf) {
                Ok(true) => return Ok(Some(msg)),
                Ok(false) => continue,
                Err(e) => {
                    self.write_core_dump(&msg, &[]);
                    return Err(e);
                }
            }
        }
    }

    /// `tail` holds bytes of a partially read chunk the message never got to see.
    fn write_core_dump(&self, msg: &BmpMessage, tail: &[u8]) {
        if !self.core_dump {
            return;
        }
        let bytes = [msg.raw_header(), msg.raw_payload(), tail].concat();
        if let Err(e) = std::fs::write(CORE_DUMP_FILE, bytes) {
            error!("unable to write to {}: {}", CORE_DUMP_FILE, e);
        }
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream. Returns the bytes read.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader handing out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn peer_down(reason: u8) -> Vec<u8> {
        let mut data = vec![1, 2, 0, 0];
        data.extend([0u8; 24]);
        data.extend(65000u32.to_be_bytes());
        data.extend([0u8; 12]);
        data.push(reason);
        data
    }

    #[test]
    fn test_read_chunk() {
        let mut reader = Trickle {
            data: &[1, 2, 3, 4, 5],
            step: 2,
        };
        let mut buf = [0u8; 4];
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 1);
    }

    #[test]
    fn test_next_message() {
        let mut stream = peer_down(2);
        stream.extend(peer_down(4));
        let mut parser = BmpParser::new(Trickle {
            data: &stream,
            step: 7,
        });
        for _ in 0..2 {
            let msg = parser.next_message().unwrap().unwrap();
            assert!(msg.is_done());
        }
        assert!(parser.next_message().unwrap().is_none());
        assert!(parser.into_inner().data.is_empty());
    }

    #[test]
    fn test_truncated_stream() {
        let stream = peer_down(1);
        let mut parser = BmpParser::new(Cursor::new(stream)).disable_warnings();
        assert!(matches!(
            parser.next_message(),
            Err(ParserBmpError::TruncatedMessage {
                expected: 2,
                read: 0
            })
        ));
    }
}
