use serde::{Deserialize, Serialize};

/// Number of spatial slots a target can occupy.
pub const POSITION_COUNT: usize = 4;

/// Grouping factor of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Bare line segments.
    Parts,
    /// Line segments completed by a corner into arrows and triangles.
    Whole,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Parts => "parts",
            Context::Whole => "whole",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionName {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl PositionName {
    pub const ALL: [PositionName; POSITION_COUNT] = [
        PositionName::TopLeft,
        PositionName::TopRight,
        PositionName::BottomLeft,
        PositionName::BottomRight,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Unit offset from the fixation point, y pointing up.
    pub fn offset(&self) -> (f32, f32) {
        match self {
            PositionName::TopLeft => (-1.0, 1.0),
            PositionName::TopRight => (1.0, 1.0),
            PositionName::BottomLeft => (-1.0, -1.0),
            PositionName::BottomRight => (1.0, -1.0),
        }
    }
}

/// Slot of the odd shape for a condition id; ids start at 1.
pub fn position_index(id: u32) -> usize {
    (id.saturating_sub(1) as usize) % POSITION_COUNT
}

/// One cell of the design: context × target slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub context: Context,
    #[serde(rename = "position")]
    pub position_name: PositionName,
}

impl Condition {
    pub fn new(id: u32, context: Context, position_name: PositionName) -> Self {
        Self {
            id,
            context,
            position_name,
        }
    }

    pub fn position_index(&self) -> usize {
        position_index(self.id)
    }
}
