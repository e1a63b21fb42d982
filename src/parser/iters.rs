/*!
Provides parser iterator implementation.
*/
use crate::parser::bmp::{BmpMessage, ParserBmpError};
use crate::parser::BmpParser;
use log::error;
use std::io::Read;

/// Use [BmpMessageIterator] as the default iterator over decoded messages.
impl<R: Read> IntoIterator for BmpParser<R> {
    type Item = BmpMessage;
    type IntoIter = BmpMessageIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        BmpMessageIterator::new(self)
    }
}

impl<R> BmpParser<R> {
    pub fn into_message_iter(self) -> BmpMessageIterator<R> {
        BmpMessageIterator::new(self)
    }

    pub fn into_fallible_message_iter(self) -> FallibleBmpMessageIterator<R> {
        FallibleBmpMessageIterator::new(self)
    }
}

/*********
BmpMessage Iterator
**********/

/// Yields decoded messages until the end of the stream or the first error.
///
/// BMP v1 messages have no length field, so the stream cannot be resynchronized after a failed
/// message. The error is logged unless warnings are disabled.
pub struct BmpMessageIterator<R> {
    parser: BmpParser<R>,
    pub count: u64,
    finished: bool,
}

impl<R> BmpMessageIterator<R> {
    fn new(parser: BmpParser<R>) -> Self {
        BmpMessageIterator {
            parser,
            count: 0,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for BmpMessageIterator<R> {
    type Item = BmpMessage;

    fn next(&mut self) -> Option<BmpMessage> {
        if self.finished {
            return None;
        }
        match self.parser.next_message() {
            Ok(Some(msg)) => {
                self.count += 1;
                Some(msg)
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                if self.parser.options.show_warnings {
                    error!(
                        "aborted BMP message after {} messages: {}",
                        self.count, e
                    );
                }
                None
            }
        }
    }
}

/*********
Fallible BmpMessage Iterator
**********/

/// Yields `Result`s so that callers can inspect the error that ended the stream.
pub struct FallibleBmpMessageIterator<R> {
    parser: BmpParser<R>,
    finished: bool,
}

impl<R> FallibleBmpMessageIterator<R> {
    fn new(parser: BmpParser<R>) -> Self {
        FallibleBmpMessageIterator {
            parser,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for FallibleBmpMessageIterator<R> {
    type Item = Result<BmpMessage, ParserBmpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.parser.next_message() {
            Ok(Some(msg)) => Some(Ok(msg)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
