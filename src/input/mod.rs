use egui::{Context, PointerButton, Pos2, Rect, TouchId, TouchPhase};

pub mod router;

pub use router::route_event;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Whiteboard input, positions still in viewport space
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary mouse button pressed
    PointerDown { location: InputLocation },
    /// Mouse moved
    PointerMove { location: InputLocation },
    /// Primary mouse button released
    PointerUp { location: InputLocation },
    /// Mouse left the application window
    PointerLeave,
    /// First finger touched down
    TouchStart { location: InputLocation },
    /// The tracked finger moved
    TouchMove { location: InputLocation },
    /// The tracked finger lifted or the touch was cancelled
    TouchEnd,
    /// The canvas changed size, in buffer pixels
    Resize { width: usize, height: usize },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location }
            | InputEvent::PointerMove { location }
            | InputEvent::PointerUp { location }
            | InputEvent::TouchStart { location }
            | InputEvent::TouchMove { location } => location.is_in_canvas,
            _ => false,
        }
    }
}

/// Translate a viewport position into canvas buffer pixels.
///
/// egui positions are logical points, the buffer is sized in physical
/// pixels, hence the scale.
pub fn to_canvas_local(position: Pos2, canvas_rect: Rect, pixels_per_point: f32) -> Pos2 {
    ((position - canvas_rect.min) * pixels_per_point).to_pos2()
}

/// Where the canvas sits on screen for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    pub rect: Rect,
    pub pixels_per_point: f32,
}

impl CanvasMapping {
    pub fn new(rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            rect,
            pixels_per_point,
        }
    }

    pub fn canvas_point(&self, position: Pos2) -> Pos2 {
        to_canvas_local(position, self.rect, self.pixels_per_point)
    }

    /// Buffer size in pixels needed to cover the rect
    pub fn pixel_size(&self) -> [usize; 2] {
        let size = self.rect.size() * self.pixels_per_point;
        [
            size.x.round().max(0.0) as usize,
            size.y.round().max(0.0) as usize,
        ]
    }
}

/// Handles converting raw egui input into whiteboard InputEvents
pub struct InputHandler {
    canvas_rect: Rect,
    active_touch: Option<TouchId>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            active_touch: None,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process one frame of raw egui input
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let raw_events = ctx.input(|input| input.raw.events.clone());
        self.process_events(&raw_events)
    }

    /// Translate raw events, following only the first active touch.
    ///
    /// egui emulates pointer events from the first finger, so pointer events
    /// are dropped while a touch is tracked.
    pub fn process_events(&mut self, raw_events: &[egui::Event]) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in raw_events {
            let touch_active = self.active_touch.is_some();
            match event {
                egui::Event::PointerMoved(_)
                | egui::Event::PointerButton { .. }
                | egui::Event::PointerGone
                    if touch_active => {}
                egui::Event::PointerMoved(pos) => {
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(*pos),
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let location = self.make_location(*pos);
                    events.push(if *pressed {
                        InputEvent::PointerDown { location }
                    } else {
                        InputEvent::PointerUp { location }
                    });
                }
                egui::Event::PointerGone => events.push(InputEvent::PointerLeave),
                egui::Event::Touch { id, phase, pos, .. } => {
                    if let Some(event) = self.track_touch(*id, *phase, *pos) {
                        events.push(event);
                    }
                }
                _ => {}
            }
        }

        events
    }

    fn track_touch(&mut self, id: TouchId, phase: TouchPhase, pos: Pos2) -> Option<InputEvent> {
        match phase {
            TouchPhase::Start if self.active_touch.is_none() => {
                self.active_touch = Some(id);
                Some(InputEvent::TouchStart {
                    location: self.make_location(pos),
                })
            }
            TouchPhase::Move if self.active_touch == Some(id) => Some(InputEvent::TouchMove {
                location: self.make_location(pos),
            }),
            TouchPhase::End | TouchPhase::Cancel if self.active_touch == Some(id) => {
                self.active_touch = None;
                Some(InputEvent::TouchEnd)
            }
            _ => None,
        }
    }
}
