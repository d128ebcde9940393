//! Recording metadata for stored voice messages.

use alloc::string::String;

slotmap::new_key_type! {
    /// Stable handle for a stored recording.
    pub struct RecordingId;
}

/// Metadata for one recorded voice message.
///
/// The backing audio lives on disk at `file_ref`; the core only requires
/// that it resolve to playable bytes. `duration_secs` is display-only —
/// playback completion is signaled by the player, never inferred from the
/// stored duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    pub name: String,
    pub duration_secs: f32,
    /// Creation time as Unix seconds.
    pub created_at: u64,
    /// Path to the backing audio file.
    pub file_ref: String,
}

impl Recording {
    pub fn new(name: impl Into<String>, duration_secs: f32, created_at: u64, file_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_secs,
            created_at,
            file_ref: file_ref.into(),
        }
    }
}
