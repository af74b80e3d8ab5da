use egui::{Context, Event, PointerButton, Pos2, Rect, TouchPhase, Vec2};

/// Canvas input, already translated into raster pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed or a touch started on the canvas
    PointerDown { position: Pos2 },
    /// Pointer or touch point moved over the canvas
    PointerMove { position: Pos2 },
    /// Button released, touch ended or touch cancelled
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
}

impl InputEvent {
    /// Touch input is mapped onto the same events as the mouse.
    pub fn from_touch(phase: TouchPhase, position: Pos2) -> Self {
        match phase {
            TouchPhase::Start => Self::PointerDown { position },
            TouchPhase::Move => Self::PointerMove { position },
            TouchPhase::End | TouchPhase::Cancel => Self::PointerUp,
        }
    }
}

/// Converts raw egui input into canvas-local `InputEvent`s.
pub struct InputHandler {
    canvas_rect: Rect,
    raster_size: Vec2,
    pointer_inside: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, raster_size: Vec2) -> Self {
        Self {
            canvas_rect,
            raster_size,
            pointer_inside: false,
        }
    }

    /// Update where the canvas is drawn on screen and how large its raster is
    pub fn set_canvas_rect(&mut self, rect: Rect, raster_size: Vec2) {
        self.canvas_rect = rect;
        self.raster_size = raster_size;
    }

    /// Screen position to raster pixel position
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        let size = self.canvas_rect.size();
        let scale_x = if size.x > 0.0 { self.raster_size.x / size.x } else { 1.0 };
        let scale_y = if size.y > 0.0 { self.raster_size.y / size.y } else { 1.0 };
        let local = screen - self.canvas_rect.min;
        Pos2::new(local.x * scale_x, local.y * scale_y)
    }

    /// Process this frame's raw events.
    ///
    /// egui also synthesizes pointer events from touches, so a frame that
    /// carries touch events is read from the touches only.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let raw_events = ctx.input(|input| input.raw.events.clone());
        self.process_events(&raw_events)
    }

    pub fn process_events(&mut self, raw_events: &[Event]) -> Vec<InputEvent> {
        let has_touches = raw_events.iter().any(|event| matches!(event, Event::Touch { .. }));
        raw_events
            .iter()
            .filter(|event| has_touches == matches!(event, Event::Touch { .. }))
            .filter_map(|event| self.translate(event))
            .collect()
    }

    fn translate(&mut self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Touch { phase, pos, .. } => {
                if *phase == TouchPhase::Start && !self.canvas_rect.contains(*pos) {
                    return None;
                }
                Some(InputEvent::from_touch(*phase, self.to_canvas(*pos)))
            }
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    self.canvas_rect
                        .contains(*pos)
                        .then(|| InputEvent::PointerDown { position: self.to_canvas(*pos) })
                } else {
                    Some(InputEvent::PointerUp)
                }
            }
            Event::PointerMoved(pos) => {
                let inside = self.canvas_rect.contains(*pos);
                let was_inside = std::mem::replace(&mut self.pointer_inside, inside);
                if inside {
                    Some(InputEvent::PointerMove { position: self.to_canvas(*pos) })
                } else if was_inside {
                    Some(InputEvent::PointerLeave)
                } else {
                    None
                }
            }
            Event::PointerGone => {
                let was_inside = std::mem::replace(&mut self.pointer_inside, false);
                was_inside.then_some(InputEvent::PointerLeave)
            }
            _ => None,
        }
    }
}
