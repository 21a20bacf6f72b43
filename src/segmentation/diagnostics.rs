//! Lookup-miss diagnostics.
//!
//! A lookup that finds no pad returns [`crate::mapping::Pad::INVALID`]. When
//! the caller asks for warnings, the miss is also handed to a
//! [`DiagnosticSink`]. The default sink logs through `tracing`; tests can
//! swap in [`RecordingSink`] to assert on what was reported.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::warn;

use crate::mapping::{ElectronicsAddress, GridIndices, Vector2};

/// Why a lookup produced no pad.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupMiss {
    /// No motif position carries the connector id.
    #[error("Connector id {connector_id} not found")]
    UnknownConnector {
        /// The requested connector id.
        connector_id: i32,
    },

    /// The connector exists but the channel is not wired to a pad.
    #[error("The pad number {} doesn't exist on connector {}", .address.channel_id, .address.connector_id)]
    UnconnectedChannel {
        /// The requested address.
        address: ElectronicsAddress,
    },

    /// No motif position covers the indices.
    #[error("No motif found containing pad location {indices}")]
    NoMotifAtIndices {
        /// The requested indices.
        indices: GridIndices,
    },

    /// The indices fall on a motif cell without a channel.
    #[error("No connection for pad location {indices}")]
    NoConnectionAtIndices {
        /// The requested indices.
        indices: GridIndices,
    },

    /// The position lies outside every motif position.
    #[error("Position {position} mm outside limits")]
    PositionOutsideSlat {
        /// The requested position (module frame).
        position: Vector2,
    },

    /// The position lies on a motif cell without a channel.
    #[error("Position {position} mm outside motif limits")]
    PositionInGap {
        /// The requested position (module frame).
        position: Vector2,
    },
}

/// Receives lookup misses when warnings are requested.
pub trait DiagnosticSink {
    /// Reports a miss on the slat identified by `slat`.
    fn report(&self, slat: &str, miss: &LookupMiss);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn report(&self, slat: &str, miss: &LookupMiss) {
        (**self).report(slat, miss);
    }
}

/// Logs misses as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, slat: &str, miss: &LookupMiss) {
        warn!(slat, "{miss}");
    }
}

/// Collects misses in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    misses: Mutex<Vec<(String, LookupMiss)>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the misses reported so far, oldest first.
    #[must_use]
    pub fn misses(&self) -> Vec<LookupMiss> {
        self.lock().iter().map(|(_, miss)| miss.clone()).collect()
    }

    /// Returns the misses reported so far, with the slat they came from.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, LookupMiss)> {
        self.lock().clone()
    }

    /// Number of misses reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets all reported misses.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, LookupMiss)>> {
        self.misses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, slat: &str, miss: &LookupMiss) {
        self.lock().push((slat.to_string(), miss.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_messages_name_the_key() {
        let miss = LookupMiss::UnknownConnector { connector_id: 42 };
        assert_eq!(miss.to_string(), "Connector id 42 not found");

        let miss = LookupMiss::UnconnectedChannel {
            address: ElectronicsAddress::new(10, 63),
        };
        assert_eq!(
            miss.to_string(),
            "The pad number 63 doesn't exist on connector 10"
        );

        let miss = LookupMiss::NoMotifAtIndices {
            indices: GridIndices::new(4, 2),
        };
        assert_eq!(miss.to_string(), "No motif found containing pad location (4,2)");
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.report("s1", &LookupMiss::UnknownConnector { connector_id: 1 });
        (&sink).report("s2", &LookupMiss::UnknownConnector { connector_id: 2 });

        assert_eq!(sink.len(), 2);
        let entries = sink.entries();
        assert_eq!(entries[0].0, "s1");
        assert_eq!(entries[1].1, LookupMiss::UnknownConnector { connector_id: 2 });

        sink.clear();
        assert!(sink.misses().is_empty());
    }
}
