use super::{CanvasMapping, InputEvent};
use crate::surface::DrawingSurface;

/// Drives the surface state machine from one input event.
///
/// Input that arrives out of order (a move with no press, a second release)
/// is ignored by the surface, so the router forwards events without tracking
/// pointer state of its own.
pub fn route_event(surface: &mut DrawingSurface, event: &InputEvent, mapping: &CanvasMapping) {
    match event {
        InputEvent::PointerDown { location } | InputEvent::TouchStart { location } => {
            if !event.is_in_canvas() {
                return;
            }
            if let Err(err) = surface.begin_stroke(mapping.canvas_point(location.position)) {
                log::debug!("Ignored stroke start: {}", err);
            }
        }
        InputEvent::PointerMove { location } => {
            // Leaving the canvas with the mouse finishes the stroke
            if event.is_in_canvas() {
                surface.extend_stroke(mapping.canvas_point(location.position));
            } else {
                surface.end_stroke();
            }
        }
        InputEvent::TouchMove { location } => {
            surface.extend_stroke(mapping.canvas_point(location.position));
        }
        InputEvent::PointerUp { .. } | InputEvent::PointerLeave | InputEvent::TouchEnd => {
            surface.end_stroke();
        }
        InputEvent::Resize { width, height } => {
            if let Err(err) = surface.resize(*width, *height) {
                log::warn!("Failed to resize whiteboard: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use egui::{pos2, vec2, Color32, Pos2, Rect};

    fn mapping() -> CanvasMapping {
        CanvasMapping::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 100.0)), 1.0)
    }

    fn at(mapping: &CanvasMapping, position: Pos2) -> InputLocation {
        InputLocation {
            position,
            is_in_canvas: mapping.rect.contains(position),
        }
    }

    fn surface() -> DrawingSurface {
        let mut surface = DrawingSurface::default();
        surface.initialize(200, 100).unwrap();
        surface
    }

    #[test]
    fn test_pointer_gesture_draws_in_local_space() {
        let mapping = mapping();
        let mut surface = surface();

        let events = [
            InputEvent::PointerDown { location: at(&mapping, pos2(110.0, 60.0)) },
            InputEvent::PointerMove { location: at(&mapping, pos2(110.0, 90.0)) },
            InputEvent::PointerUp { location: at(&mapping, pos2(110.0, 90.0)) },
        ];
        for event in &events {
            route_event(&mut surface, event, &mapping);
        }

        assert_eq!(surface.pixel(10, 25), Some(Color32::BLACK));
        assert_eq!(surface.history_len(), 2);
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mapping = mapping();
        let mut surface = surface();

        route_event(
            &mut surface,
            &InputEvent::PointerDown { location: at(&mapping, pos2(10.0, 10.0)) },
            &mapping,
        );
        assert!(!surface.is_stroke_active());
    }

    #[test]
    fn test_leaving_canvas_ends_stroke() {
        let mapping = mapping();
        let mut surface = surface();

        route_event(
            &mut surface,
            &InputEvent::PointerDown { location: at(&mapping, pos2(110.0, 60.0)) },
            &mapping,
        );
        route_event(
            &mut surface,
            &InputEvent::PointerMove { location: at(&mapping, pos2(400.0, 60.0)) },
            &mapping,
        );

        assert!(!surface.is_stroke_active());
        assert_eq!(surface.history_len(), 2);

        // The matching release is a duplicate and changes nothing
        route_event(&mut surface, &InputEvent::PointerLeave, &mapping);
        assert_eq!(surface.history_len(), 2);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mapping = mapping();
        let mut surface = surface();
        let revision = surface.revision();

        route_event(
            &mut surface,
            &InputEvent::PointerMove { location: at(&mapping, pos2(120.0, 70.0)) },
            &mapping,
        );
        route_event(&mut surface, &InputEvent::TouchEnd, &mapping);

        assert_eq!(surface.revision(), revision);
        assert_eq!(surface.history_len(), 1);
    }

    #[test]
    fn test_resize_mid_stroke_aborts() {
        let mapping = mapping();
        let mut surface = surface();

        route_event(
            &mut surface,
            &InputEvent::TouchStart { location: at(&mapping, pos2(110.0, 60.0)) },
            &mapping,
        );
        route_event(
            &mut surface,
            &InputEvent::TouchMove { location: at(&mapping, pos2(150.0, 60.0)) },
            &mapping,
        );
        route_event(&mut surface, &InputEvent::Resize { width: 120, height: 80 }, &mapping);

        assert!(!surface.is_stroke_active());
        assert_eq!(surface.size(), Some([120, 80]));
        assert_eq!(surface.history_len(), 1);
        assert_eq!(surface.pixel(30, 10), Some(Color32::WHITE));

        // The finger lifting after the resize commits nothing
        route_event(&mut surface, &InputEvent::TouchEnd, &mapping);
        assert_eq!(surface.history_len(), 1);
    }
}
