/// Input event types the effect understands.
///
/// Pointer coordinates are client pixels (origin top-left, y-down), exactly
/// as the browser reports them; the effect converts them to world space
/// against the viewport in effect at the time the event is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The mouse moved to client coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The first touch point moved to client coordinates (x, y).
    TouchMove { x: f32, y: f32 },
    /// A click at client coordinates (x, y). Drops food when the creature is on.
    Click { x: f32, y: f32 },
    /// The viewport changed size.
    Resize { width: u32, height: u32 },
    /// Page visibility changed.
    Visibility { hidden: bool },
}

/// A queue of input events.
/// JS writes events into the queue; Rust applies and drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
