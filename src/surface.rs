use std::path::Path;

use egui::{Color32, Pos2};

use crate::canvas::CanvasBuffer;
use crate::error::{WhiteboardError, WhiteboardResult};
use crate::history::{SnapshotHistory, DEFAULT_MAX_HISTORY, DEFAULT_MAX_HISTORY_BYTES};
use crate::stroke::ActiveStroke;
use crate::tool::{StrokeWidth, ToolKind, ToolSettings};

/// Where the surface is in its input cycle
#[derive(Debug, Default, Clone, PartialEq)]
pub enum SurfaceState {
    #[default]
    Uninitialized,
    Idle,
    StrokeActive(ActiveStroke),
}

impl SurfaceState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Idle => "Idle",
            Self::StrokeActive(_) => "StrokeActive",
        }
    }
}

/// Canvas and history that only exist once the surface has a size
#[derive(Debug)]
struct Board {
    canvas: CanvasBuffer,
    history: SnapshotHistory,
}

/// The whiteboard engine: a raster canvas, the stroke state machine and
/// a snapshot history over the canvas.
#[derive(Debug)]
pub struct DrawingSurface {
    board: Option<Board>,
    state: SurfaceState,
    settings: ToolSettings,
    background: Color32,
    max_history: usize,
    max_history_bytes: usize,
    revision: u64,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(Color32::WHITE, DEFAULT_MAX_HISTORY)
    }
}

impl DrawingSurface {
    pub fn new(background: Color32, max_history: usize) -> Self {
        Self {
            board: None,
            state: SurfaceState::Uninitialized,
            settings: ToolSettings::default(),
            background,
            max_history,
            max_history_bytes: DEFAULT_MAX_HISTORY_BYTES,
            revision: 0,
        }
    }

    /// Limit the memory held by undo snapshots; applies from the next
    /// `initialize`
    pub fn with_history_budget(mut self, max_bytes: usize) -> Self {
        self.max_history_bytes = max_bytes;
        self
    }

    /// Allocate a blank canvas and reset the history to that one snapshot
    pub fn initialize(&mut self, width: usize, height: usize) -> WhiteboardResult {
        if width == 0 || height == 0 {
            return Err(WhiteboardError::InvalidDimensions { width, height });
        }

        let canvas = CanvasBuffer::new(width, height, self.background);
        let history = SnapshotHistory::new(canvas.clone(), self.max_history)
            .with_max_bytes(self.max_history_bytes);
        self.board = Some(Board { canvas, history });
        self.state = SurfaceState::Idle;
        self.bump_revision();
        log::debug!(
            "Surface initialized at {}x{}, keeping up to {} snapshot(s)",
            width,
            height,
            self.board.as_ref().map_or(0, |board| board.history.max_depth())
        );
        Ok(())
    }

    /// Re-initialize for a new viewport size.
    ///
    /// Pixel coordinates do not survive a resize, so an in-flight stroke is
    /// dropped and all history is discarded. The stroke is dropped even when
    /// the new size is rejected.
    pub fn resize(&mut self, width: usize, height: usize) -> WhiteboardResult {
        self.abort_stroke();
        if let Some(board) = &self.board {
            log::debug!(
                "Resize to {}x{} discards {} history entries",
                width,
                height,
                board.history.len()
            );
        }
        self.initialize(width, height)
    }

    /// Drop the active stroke and put the last committed snapshot back
    fn abort_stroke(&mut self) {
        let SurfaceState::StrokeActive(stroke) = &self.state else {
            return;
        };
        log::debug!(
            "Aborted stroke from {:?} with {} point(s)",
            stroke.origin(),
            stroke.point_count()
        );

        // A stroke can only begin on an initialized board
        self.state = SurfaceState::Idle;
        if let Some(board) = &mut self.board {
            board.canvas.clone_from(board.history.current());
        }
        self.bump_revision();
    }

    pub fn set_settings(&mut self, settings: ToolSettings) {
        self.settings = settings;
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.settings = self.settings.with_tool(tool);
    }

    pub fn set_color(&mut self, color: [u8; 3]) {
        self.settings = self.settings.with_color(color);
    }

    pub fn set_stroke_width(&mut self, width: StrokeWidth) {
        self.settings = self.settings.with_width(width);
    }

    /// Start a stroke at `point` (canvas-local pixels)
    pub fn begin_stroke(&mut self, point: Pos2) -> WhiteboardResult {
        match self.state {
            SurfaceState::Uninitialized => Err(WhiteboardError::NotInitialized),
            SurfaceState::StrokeActive(_) => Err(WhiteboardError::StrokeActive),
            SurfaceState::Idle => {
                let brush = self.settings.brush(self.background);
                self.state = SurfaceState::StrokeActive(ActiveStroke::new(point, brush));
                Ok(())
            }
        }
    }

    /// Draw from the last point of the active stroke to `point`.
    ///
    /// Returns false (and does nothing) when no stroke is active.
    pub fn extend_stroke(&mut self, point: Pos2) -> bool {
        let (SurfaceState::StrokeActive(stroke), Some(board)) = (&mut self.state, &mut self.board)
        else {
            return false;
        };

        let (from, to) = stroke.advance(point);
        board.canvas.stroke_segment(from, to, stroke.brush());
        self.bump_revision();
        true
    }

    /// Finish the active stroke and commit a snapshot.
    ///
    /// Returns false when there was no stroke to finish.
    pub fn end_stroke(&mut self) -> bool {
        if !matches!(self.state, SurfaceState::StrokeActive(_)) {
            return false;
        }
        self.state = SurfaceState::Idle;
        self.commit();
        true
    }

    /// Step back one snapshot. `Ok(false)` when already at the oldest.
    pub fn undo(&mut self) -> WhiteboardResult<bool> {
        let board = self.idle_board()?;
        let Some(snapshot) = board.history.undo() else {
            return Ok(false);
        };
        board.canvas.clone_from(snapshot);
        log::debug!("Undo to history step {}", board.history.cursor());
        self.bump_revision();
        Ok(true)
    }

    /// Step forward one snapshot. `Ok(false)` when already at the newest.
    pub fn redo(&mut self) -> WhiteboardResult<bool> {
        let board = self.idle_board()?;
        let Some(snapshot) = board.history.redo() else {
            return Ok(false);
        };
        board.canvas.clone_from(snapshot);
        log::debug!("Redo to history step {}", board.history.cursor());
        self.bump_revision();
        Ok(true)
    }

    /// Wipe the canvas to the background; undoable like a stroke
    pub fn clear(&mut self) -> WhiteboardResult {
        let background = self.background;
        self.idle_board()?.canvas.fill(background);
        self.commit();
        Ok(())
    }

    /// Encode the current canvas as PNG bytes
    pub fn export_png(&self) -> WhiteboardResult<Vec<u8>> {
        self.canvas()
            .ok_or(WhiteboardError::NotInitialized)?
            .to_png()
    }

    /// Write the current canvas to `path` as a PNG file
    pub fn export_to_file(&self, path: &Path) -> WhiteboardResult {
        let bytes = self.export_png()?;
        std::fs::write(path, &bytes)?;
        log::info!("Exported whiteboard to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    pub fn canvas(&self) -> Option<&CanvasBuffer> {
        self.board.as_ref().map(|board| &board.canvas)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        self.canvas().and_then(|canvas| canvas.pixel(x, y))
    }

    /// Canvas size in pixels, if initialized
    pub fn size(&self) -> Option<[usize; 2]> {
        self.canvas().map(CanvasBuffer::size)
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn is_stroke_active(&self) -> bool {
        matches!(self.state, SurfaceState::StrokeActive(_))
    }

    pub fn settings(&self) -> ToolSettings {
        self.settings
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn history_len(&self) -> usize {
        self.board.as_ref().map_or(0, |board| board.history.len())
    }

    pub fn cursor(&self) -> usize {
        self.board.as_ref().map_or(0, |board| board.history.cursor())
    }

    pub fn can_undo(&self) -> bool {
        !self.is_stroke_active()
            && self.board.as_ref().is_some_and(|board| board.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        !self.is_stroke_active()
            && self.board.as_ref().is_some_and(|board| board.history.can_redo())
    }

    /// Bumped whenever the visible canvas changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn idle_board(&mut self) -> WhiteboardResult<&mut Board> {
        match (&self.state, self.board.as_mut()) {
            (SurfaceState::StrokeActive(_), _) => {
                log::debug!("Rejected history operation during an active stroke");
                Err(WhiteboardError::StrokeActive)
            }
            (_, Some(board)) => Ok(board),
            (_, None) => Err(WhiteboardError::NotInitialized),
        }
    }

    fn commit(&mut self) {
        if let Some(board) = &mut self.board {
            board.history.commit(board.canvas.clone());
            log::debug!(
                "Committed history step {} of {}",
                board.history.cursor(),
                board.history.len()
            );
        }
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
