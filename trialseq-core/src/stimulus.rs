use crate::condition::{Context, PositionName};
use crate::event::EventKind;

/// Primitive strokes the displays are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Bar from bottom-left to top-right.
    Diagonal45,
    /// Bar from top-left to bottom-right.
    Diagonal135,
    /// Open corner: top-left, bottom-left, bottom-right.
    Corner,
}

/// A named set of shapes drawn together at one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeGroup {
    Parts,
    PartsOdd,
    /// Arrow.
    Whole,
    /// Triangle.
    WholeOdd,
}

impl ShapeGroup {
    pub fn majority(context: Context) -> Self {
        match context {
            Context::Parts => ShapeGroup::Parts,
            Context::Whole => ShapeGroup::Whole,
        }
    }

    pub fn odd(context: Context) -> Self {
        match context {
            Context::Parts => ShapeGroup::PartsOdd,
            Context::Whole => ShapeGroup::WholeOdd,
        }
    }

    pub fn shapes(&self) -> &'static [Shape] {
        match self {
            ShapeGroup::Parts => &[Shape::Diagonal45],
            ShapeGroup::PartsOdd => &[Shape::Diagonal135],
            ShapeGroup::Whole => &[Shape::Corner, Shape::Diagonal45],
            ShapeGroup::WholeOdd => &[Shape::Corner, Shape::Diagonal135],
        }
    }
}

/// One drawing pass; later layers cover earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Group { group: ShapeGroup, slot: PositionName },
    Fixation,
    Text { content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Instructions,
    Event(EventKind),
}

/// Everything a presenter needs for one flip.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub kind: FrameKind,
    pub layers: Vec<Layer>,
}

impl Frame {
    pub fn fixation(kind: EventKind) -> Self {
        Self {
            kind: FrameKind::Event(kind),
            layers: vec![Layer::Fixation],
        }
    }

    /// Majority groups on the three free slots, the odd group on `target`,
    /// fixation mark last so it stays on top.
    pub fn search_display(context: Context, target: PositionName) -> Self {
        let mut layers: Vec<Layer> = PositionName::ALL
            .iter()
            .filter(|slot| **slot != target)
            .map(|slot| Layer::Group {
                group: ShapeGroup::majority(context),
                slot: *slot,
            })
            .collect();
        layers.push(Layer::Group {
            group: ShapeGroup::odd(context),
            slot: target,
        });
        layers.push(Layer::Fixation);

        Self {
            kind: FrameKind::Event(EventKind::Stimulus),
            layers,
        }
    }

    pub fn instructions(text: &str) -> Self {
        Self {
            kind: FrameKind::Instructions,
            layers: vec![Layer::Text {
                content: text.to_string(),
            }],
        }
    }
}
