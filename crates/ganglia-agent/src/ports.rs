//! Decoding of the node agent's compact port-range encoding.

use crate::error::DecodeError;

/// The flattened, ordered sequence of ports allocated to one task.
///
/// The node agent reports allocations as a bracketed list of inclusive
/// ranges, e.g. `"[31000-31005, 32005-32005]"`. Every range is expanded into
/// its full set of concrete ports, concatenated in declaration order, so an
/// index into the sequence addresses one specific allocated port. The
/// narrower reading that takes only each range's lower bound silently
/// discards ports and is deliberately not implemented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSequence {
    ports: Vec<u16>,
}

impl PortSequence {
    /// Parses the compact encoding into a flattened port sequence.
    ///
    /// The enclosing brackets are stripped, segments are split on commas and
    /// trimmed, and each segment must be two integer bounds joined by a
    /// single hyphen with `low <= high`. An empty list (`"[]"`) is a valid
    /// empty sequence.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let inner = raw.trim();
        let inner = inner.strip_prefix('[').unwrap_or(inner);
        let inner = inner.strip_suffix(']').unwrap_or(inner);
        if inner.trim().is_empty() {
            return Ok(Self { ports: Vec::new() });
        }
        let mut ports = Vec::new();
        for segment in inner.split(',') {
            let segment = segment.trim();
            let (low, high) = parse_bounds(segment)?;
            ports.extend(low..=high);
        }
        Ok(Self { ports })
    }

    /// Returns the port at `index` within the flattened sequence.
    pub fn get(&self, index: usize) -> Result<u16, DecodeError> {
        self.ports
            .get(index)
            .copied()
            .ok_or(DecodeError::IndexOutOfRange {
                index,
                len: self.ports.len(),
            })
    }

    /// Number of concrete ports in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the task has no ports allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

fn parse_bounds(segment: &str) -> Result<(u16, u16), DecodeError> {
    let malformed = || DecodeError::MalformedRange {
        segment: segment.to_owned(),
    };
    let (low, high) = segment.split_once('-').ok_or_else(malformed)?;
    let low: u16 = low.trim().parse().map_err(|_| malformed())?;
    let high: u16 = high.trim().parse().map_err(|_| malformed())?;
    if high < low {
        return Err(malformed());
    }
    Ok((low, high))
}
