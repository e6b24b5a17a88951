use anyhow::{Result, anyhow};
use tiny_skia::{Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;
use trialseq_core::{Frame, FrameKind, Layer, PositionName, Shape, ShapeGroup};
use trialseq_experiment::Presenter;

use crate::geometry::StimulusGeometry;

/// Offscreen presenter: `render` draws into a back buffer, `present` copies
/// it to the front buffer a window backend would scan out.
pub struct SkiaPresenter {
    center: (f32, f32),
    geometry: StimulusGeometry,
    background: Color,
    ink: Color,

    back: Pixmap,
    front: Pixmap,
    frames_presented: usize,
    last_kind: Option<FrameKind>,
}

impl SkiaPresenter {
    pub fn new(width: u32, height: u32, geometry: StimulusGeometry) -> Result<Self> {
        let background = Color::from_rgba8(128, 128, 128, 255);
        let mut back = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("cannot allocate a {width}×{height} canvas"))?;
        back.fill(background);
        let front = back.clone();

        Ok(Self {
            center: (width as f32 / 2.0, height as f32 / 2.0),
            geometry,
            background,
            ink: Color::from_rgba8(0, 0, 0, 255),
            back,
            front,
            frames_presented: 0,
            last_kind: None,
        })
    }

    pub fn front(&self) -> &Pixmap {
        &self.front
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn last_kind(&self) -> Option<FrameKind> {
        self.last_kind
    }

    pub fn slot_center(&self, slot: PositionName) -> (f32, f32) {
        self.geometry.slot_center(slot, self.center)
    }

    fn draw_group(&mut self, group: ShapeGroup, slot: PositionName) -> Result<()> {
        let pos = self.slot_center(slot);
        for shape in group.shapes() {
            self.draw_shape(*shape, pos)?;
        }
        Ok(())
    }

    fn draw_shape(&mut self, shape: Shape, (cx, cy): (f32, f32)) -> Result<()> {
        let h = self.geometry.half_size_px();
        let mut pb = PathBuilder::new();
        match shape {
            Shape::Diagonal45 => {
                pb.move_to(cx - h, cy + h);
                pb.line_to(cx + h, cy - h);
            }
            Shape::Diagonal135 => {
                pb.move_to(cx - h, cy - h);
                pb.line_to(cx + h, cy + h);
            }
            Shape::Corner => {
                pb.move_to(cx - h, cy - h);
                pb.line_to(cx - h, cy + h);
                pb.line_to(cx + h, cy + h);
            }
        }
        let path = pb
            .finish()
            .ok_or_else(|| anyhow!("degenerate path for {shape:?}"))?;

        let mut paint = Paint::default();
        paint.set_color(self.ink);
        let stroke = Stroke {
            width: self.geometry.px(self.geometry.line_width),
            line_cap: LineCap::Butt,
            ..Default::default()
        };
        self.back
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }

    fn draw_fixation(&mut self) -> Result<()> {
        let r = self.geometry.px(self.geometry.fixation_radius);
        let path = PathBuilder::from_circle(self.center.0, self.center.1, r)
            .ok_or_else(|| anyhow!("fixation radius {r} px is not drawable"))?;
        let mut paint = Paint::default();
        paint.set_color(self.ink);
        self.back.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        Ok(())
    }
}

impl Presenter for SkiaPresenter {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.back.fill(self.background);
        for layer in &frame.layers {
            match layer {
                Layer::Group { group, slot } => self.draw_group(*group, *slot)?,
                Layer::Fixation => self.draw_fixation()?,
                // no font is bundled for offscreen output
                Layer::Text { content } => {
                    debug!(chars = content.chars().count(), "skipping text layer")
                }
            }
        }
        self.last_kind = Some(frame.kind);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.front.data_mut().copy_from_slice(self.back.data());
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialseq_core::{Context, EventKind};

    fn presenter() -> SkiaPresenter {
        SkiaPresenter::new(800, 600, StimulusGeometry::default()).unwrap()
    }

    fn is_ink(p: &SkiaPresenter, x: u32, y: u32) -> bool {
        p.front().pixel(x, y).unwrap().red() < 64
    }

    #[test]
    fn test_zero_sized_canvas_is_an_error() {
        assert!(SkiaPresenter::new(0, 600, StimulusGeometry::default()).is_err());
    }

    #[test]
    fn test_nothing_visible_until_present() {
        let mut p = presenter();
        p.render(&Frame::fixation(EventKind::Fixation)).unwrap();
        assert!(!is_ink(&p, 400, 300));
        p.present().unwrap();
        assert!(is_ink(&p, 400, 300));
        assert_eq!(p.frames_presented(), 1);
        assert_eq!(p.last_kind(), Some(FrameKind::Event(EventKind::Fixation)));
    }

    #[test]
    fn test_odd_shape_drawn_at_target_slot() {
        let mut p = presenter();
        p.render(&Frame::search_display(Context::Parts, PositionName::TopLeft))
            .unwrap();
        p.present().unwrap();

        // every slot centre and the fixation dot carry ink
        for slot in PositionName::ALL {
            let (x, y) = p.slot_center(slot);
            assert!(is_ink(&p, x as u32, y as u32), "{slot:?}");
        }
        assert!(is_ink(&p, 400, 300));

        // the 135° bar passes up-left of centre only at the target
        assert!(is_ink(&p, 215, 115));
        assert!(!is_ink(&p, 535, 115));
    }

    #[test]
    fn test_whole_context_adds_corner() {
        let mut p = presenter();
        p.render(&Frame::search_display(Context::Parts, PositionName::TopLeft))
            .unwrap();
        p.present().unwrap();
        assert!(!is_ink(&p, 180, 150));
        assert!(!is_ink(&p, 210, 200));

        // left edge runs along x = cx - h, bottom edge along y = cy + h
        p.render(&Frame::search_display(Context::Whole, PositionName::TopLeft))
            .unwrap();
        p.present().unwrap();
        assert!(is_ink(&p, 180, 150));
        assert!(is_ink(&p, 210, 200));
    }

    #[test]
    fn test_text_layers_are_skipped() {
        let mut p = presenter();
        p.render(&Frame::instructions("press space")).unwrap();
        p.present().unwrap();
        assert!(!is_ink(&p, 400, 300));
        assert_eq!(p.last_kind(), Some(FrameKind::Instructions));
    }
}
