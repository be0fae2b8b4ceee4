/// Viewport orientation. Square viewports count as landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// `Portrait` only when strictly taller than wide.
    pub fn of(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// `(radius ratio, strength ratio)`, both relative to viewport height.
    pub fn ratios(self) -> (f32, f32) {
        match self {
            Orientation::Portrait => (0.05, 0.4),
            Orientation::Landscape => (0.4, 0.6),
        }
    }
}

/// Repulsion radius and strength, derived from the viewport on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub orientation: Orientation,
    pub r_ratio: f32,
    pub strength_ratio: f32,
    /// Repulsion radius `R` in world units. Positive for any non-degenerate viewport.
    pub radius: f32,
    /// Peak displacement at the pointer. Never negative.
    pub strength: f32,
}

impl SimulationParams {
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let orientation = Orientation::of(width, height);
        let (r_ratio, strength_ratio) = orientation.ratios();
        let h = height as f32;
        Self {
            orientation,
            r_ratio,
            strength_ratio,
            radius: h * r_ratio,
            strength: h * strength_ratio,
        }
    }

    /// Hover padding around the text bounds; same as the radius.
    pub fn padding(&self) -> f32 {
        self.radius
    }
}
