//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtoError {
    #[error("buffer truncated at offset {offset}: need {needed} bytes, have {remaining}")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid UTF-8 text at offset {offset}")]
    InvalidEncoding { offset: usize },

    #[error("unterminated string at offset {offset}: no NUL within {max_length} bytes")]
    UnterminatedString { offset: usize, max_length: usize },

    #[error("invalid data at offset {offset}: {reason}")]
    InvalidData { offset: usize, reason: String },

    #[error("framing mismatch: declared {declared} bytes, consumed {consumed}")]
    FramingMismatch { declared: usize, consumed: usize },

    #[error("invalid version: {0:?}")]
    InvalidVersion(String),

    #[error("field `{field}`: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<ProtoError>,
    },

    #[error("{component} at offset {offset}: {source}")]
    Component {
        component: &'static str,
        offset: usize,
        #[source]
        source: Box<ProtoError>,
    },

    #[error("message {message_id} at offset {offset}: {source}")]
    Packet {
        message_id: u16,
        offset: usize,
        #[source]
        source: Box<ProtoError>,
    },
}

impl ProtoError {
    /// Attach the name of the field being read when this error occurred.
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// The innermost error, with every context wrapper removed.
    pub fn root_cause(&self) -> &ProtoError {
        match self {
            Self::Field { source, .. }
            | Self::Component { source, .. }
            | Self::Packet { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.root_cause(), Self::TruncatedBuffer { .. })
    }

    pub fn is_framing_mismatch(&self) -> bool {
        matches!(self.root_cause(), Self::FramingMismatch { .. })
    }

    /// Field-group names from the outermost to the innermost.
    pub fn component_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Component {
                    component, source, ..
                } => {
                    path.push(*component);
                    current = source;
                }
                Self::Field { source, .. } | Self::Packet { source, .. } => current = source,
                _ => return path,
            }
        }
    }
}
