use trialseq_core::PositionName;

/// Display layout in degrees of visual angle, plus the monitor's
/// pixels-per-degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StimulusGeometry {
    /// Edge length of a shape group.
    pub stim_size: f32,
    pub line_width: f32,
    /// Horizontal and vertical distance of each slot from fixation.
    pub stim_dist: f32,
    pub fixation_radius: f32,
    pub pixels_per_degree: f32,
}

impl Default for StimulusGeometry {
    fn default() -> Self {
        Self {
            stim_size: 3.0,
            line_width: 0.3,
            stim_dist: 4.0,
            fixation_radius: 0.15,
            pixels_per_degree: 40.0,
        }
    }
}

impl StimulusGeometry {
    pub fn px(&self, deg: f32) -> f32 {
        deg * self.pixels_per_degree
    }

    /// Slot centre in pixel coordinates (y down) around `center`.
    pub fn slot_center(&self, slot: PositionName, center: (f32, f32)) -> (f32, f32) {
        let (dx, dy) = slot.offset();
        let d = self.px(self.stim_dist);
        (center.0 + dx * d, center.1 - dy * d)
    }

    pub fn half_size_px(&self) -> f32 {
        self.px(self.stim_size) * 0.5
    }
}
