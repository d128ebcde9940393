//! In-memory catalog of voice recordings.

use slotmap::SlotMap;
use vb_core::{Recording, RecordingId};

/// Keyed store for recordings available to the beacon.
///
/// Keys stay valid across removals of other entries; a removed key never
/// aliases a later insertion.
#[derive(Default)]
pub struct RecordingStore {
    entries: SlotMap<RecordingId, Recording>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, recording: Recording) -> RecordingId {
        self.entries.insert(recording)
    }

    pub fn get(&self, id: RecordingId) -> Option<&Recording> {
        self.entries.get(id)
    }

    pub fn remove(&mut self, id: RecordingId) -> Option<Recording> {
        self.entries.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordingId, &Recording)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
