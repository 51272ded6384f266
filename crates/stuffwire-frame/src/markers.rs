/// Default start-of-frame marker.
pub const DEFAULT_SOF: u8 = 0x7D;

/// Default end-of-frame marker.
pub const DEFAULT_EOF: u8 = 0x7E;

/// Default escape marker.
pub const DEFAULT_ESC: u8 = 0x7F;

/// Default escape index for SOF.
pub const DEFAULT_SOF_INDEX: u8 = 0x00;

/// Default escape index for EOF.
pub const DEFAULT_EOF_INDEX: u8 = 0x01;

/// Default escape index for ESC.
pub const DEFAULT_ESC_INDEX: u8 = 0x02;

/// The reserved marker bytes and their escape indices.
///
/// A marker-valued payload byte is encoded as `esc` followed by the
/// marker's index, so the index encoding stays independent of the literal
/// marker values and the set can be reconfigured per instance.
///
/// All six values must be pairwise distinct for the codec to be
/// unambiguous. The defaults are; callers supplying a custom set are
/// responsible for it (see [`Markers::is_distinct`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    /// Start-of-frame marker.
    pub sof: u8,
    /// End-of-frame marker.
    pub eof: u8,
    /// Escape marker.
    pub esc: u8,
    /// Escape index identifying an escaped SOF.
    pub sof_index: u8,
    /// Escape index identifying an escaped EOF.
    pub eof_index: u8,
    /// Escape index identifying an escaped ESC.
    pub esc_index: u8,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            sof: DEFAULT_SOF,
            eof: DEFAULT_EOF,
            esc: DEFAULT_ESC,
            sof_index: DEFAULT_SOF_INDEX,
            eof_index: DEFAULT_EOF_INDEX,
            esc_index: DEFAULT_ESC_INDEX,
        }
    }
}

impl Markers {
    /// Returns true if `byte` equals one of the three markers.
    pub fn is_marker(&self, byte: u8) -> bool {
        byte == self.sof || byte == self.eof || byte == self.esc
    }

    /// The escape index assigned to a marker-valued byte, or `None` for
    /// ordinary bytes.
    pub fn escape_index(&self, byte: u8) -> Option<u8> {
        if byte == self.sof {
            Some(self.sof_index)
        } else if byte == self.eof {
            Some(self.eof_index)
        } else if byte == self.esc {
            Some(self.esc_index)
        } else {
            None
        }
    }

    /// The marker literal identified by an escape index, or `None` for an
    /// unknown index.
    pub fn marker_for_index(&self, index: u8) -> Option<u8> {
        if index == self.sof_index {
            Some(self.sof)
        } else if index == self.eof_index {
            Some(self.eof)
        } else if index == self.esc_index {
            Some(self.esc)
        } else {
            None
        }
    }

    /// Returns true if all six configured values are pairwise distinct.
    ///
    /// Not enforced at construction; intended for callers to assert when
    /// supplying a custom marker set.
    pub fn is_distinct(&self) -> bool {
        let values = [
            self.sof,
            self.eof,
            self.esc,
            self.sof_index,
            self.eof_index,
            self.esc_index,
        ];
        for (i, a) in values.iter().enumerate() {
            if values[i + 1..].contains(a) {
                return false;
            }
        }
        true
    }
}
