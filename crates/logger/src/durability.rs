//! Durability mode for log writes.
//!
//! Defines when appended lines reach the file and the disk.

/// Durability mode for log writes.
///
/// # Mode Comparison
///
/// | Mode | Visible to readers | Survives power loss |
/// |------|--------------------|---------------------|
/// | Buffered | after `end()` or buffer fill | after `end()` |
/// | Flush | after every event | no guarantee |
/// | Strict | after every event | after every event |
///
/// `end()` always flushes, whatever the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Lines collect in a userspace buffer until it fills or the log ends.
    Buffered,

    /// Each line is handed to the OS as soon as it is formatted.
    #[default]
    Flush,

    /// Each line is flushed and `fdatasync`ed before the call returns.
    ///
    /// Use when the scheduler may be killed mid-run and the log is the only
    /// record of its decisions.
    Strict,
}

impl DurabilityMode {
    /// Whether every event is flushed to the OS immediately
    pub fn flushes_each_event(&self) -> bool {
        !matches!(self, DurabilityMode::Buffered)
    }

    /// Whether every event is synced to disk immediately
    pub fn syncs_each_event(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }

    /// Human-readable description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::Buffered => "Buffered (fastest, flushed on end)",
            DurabilityMode::Flush => "Flush per event (visible immediately)",
            DurabilityMode::Strict => "Sync per event (safest, slowest)",
        }
    }
}
