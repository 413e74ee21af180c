use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditError;
use crate::raster::Shape;

/// The editing tools. Each variant decides how a gesture turns into edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Eyedropper,
    Line,
    Rectangle,
}

impl Tool {
    /// All tools in toolbar order
    pub const ALL: [Tool; 6] = [
        Tool::Pencil,
        Tool::Eraser,
        Tool::Fill,
        Tool::Eyedropper,
        Tool::Line,
        Tool::Rectangle,
    ];

    /// Identifier used by the input protocol
    pub fn id(&self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Eyedropper => "eyedropper",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
        }
    }

    /// Human readable label for the toolbar
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill Bucket",
            Tool::Eyedropper => "Eyedropper",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
        }
    }

    /// The shape drawn by drag-to-commit tools
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Tool::Line => Some(Shape::Line),
            Tool::Rectangle => Some(Shape::Rectangle),
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tool {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| EditError::UnknownTool(s.to_owned()))
    }
}
