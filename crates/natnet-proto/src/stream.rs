//! Iteration over back-to-back messages, such as a capture file.

use bytes::Bytes;

use crate::buffer::PacketBuffer;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::ProtoError;

/// Yields one result per message in a multi-message byte sequence.
///
/// A body that fails to decode is reported and iteration moves on to the
/// next header. A bad header ends iteration after it is reported, since the
/// framing of everything after it is unknown.
#[derive(Debug)]
pub struct PacketStream<'a> {
    dispatcher: &'a Dispatcher,
    buf: PacketBuffer,
    done: bool,
}

impl<'a> PacketStream<'a> {
    pub fn new(dispatcher: &'a Dispatcher, data: impl Into<Bytes>) -> Self {
        Self {
            dispatcher,
            buf: PacketBuffer::new(data),
            done: false,
        }
    }

    /// Absolute offset of the next header.
    pub fn position(&self) -> usize {
        self.buf.position()
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }
}

impl Iterator for PacketStream<'_> {
    type Item = Result<DispatchOutcome, ProtoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.buf.remaining() == 0 {
            return None;
        }
        let header = match Dispatcher::read_header(&mut self.buf) {
            Ok(header) => header,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        Some(self.dispatcher.dispatch_body(header, &mut self.buf))
    }
}

impl std::iter::FusedIterator for PacketStream<'_> {}
