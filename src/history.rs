use crate::canvas::CanvasBuffer;

/// Default number of snapshots kept before the oldest is dropped
pub const DEFAULT_MAX_HISTORY: usize = 32;

/// Default memory budget for all snapshots together (128 MiB)
pub const DEFAULT_MAX_HISTORY_BYTES: usize = 128 * 1024 * 1024;

/// Linear undo/redo history of full canvas snapshots.
///
/// There is always at least one snapshot and the cursor always points at the
/// one currently on screen.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    snapshots: Vec<CanvasBuffer>,
    cursor: usize,
    max_depth: usize,
    max_bytes: usize,
}

impl SnapshotHistory {
    /// Start a history whose only entry is `initial`.
    ///
    /// `max_depth` is clamped to at least 1.
    pub fn new(initial: CanvasBuffer, max_depth: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            max_depth: max_depth.max(1),
            max_bytes: usize::MAX,
        }
    }

    /// Also drop old snapshots once together they exceed `max_bytes`.
    ///
    /// The newest snapshot is always kept, whatever its size.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Record a new snapshot after the cursor, dropping any redo entries
    pub fn commit(&mut self, snapshot: CanvasBuffer) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);

        let mut overflow = self.snapshots.len().saturating_sub(self.max_depth);
        let mut bytes: usize = self.snapshots[overflow..]
            .iter()
            .map(CanvasBuffer::byte_len)
            .sum();
        while bytes > self.max_bytes && overflow + 1 < self.snapshots.len() {
            bytes -= self.snapshots[overflow].byte_len();
            overflow += 1;
        }
        if overflow > 0 {
            self.snapshots.drain(..overflow);
            log::debug!("History cap reached, dropped {} oldest snapshot(s)", overflow);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back, returning the snapshot that should now be displayed
    pub fn undo(&mut self) -> Option<&CanvasBuffer> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward, returning the snapshot that should now be displayed
    pub fn redo(&mut self) -> Option<&CanvasBuffer> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn current(&self) -> &CanvasBuffer {
        debug_assert!(!self.is_empty());
        &self.snapshots[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Memory held by all snapshots
    pub fn byte_len(&self) -> usize {
        self.snapshots.iter().map(CanvasBuffer::byte_len).sum()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
