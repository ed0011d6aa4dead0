use egui::Color32;
use serde::{Deserialize, Serialize};

/// Width multiplier applied to the eraser head
pub const ERASER_SCALE: f32 = 3.0;

/// The active rendering mode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Eraser => "Eraser",
        }
    }
}

/// The stroke sizes offered by the toolbar
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeWidth {
    Thin,
    #[default]
    Medium,
    Thick,
}

impl StrokeWidth {
    pub const ALL: [StrokeWidth; 3] = [Self::Thin, Self::Medium, Self::Thick];

    /// Width in canvas pixels
    pub fn pixels(&self) -> f32 {
        match self {
            Self::Thin => 1.0,
            Self::Medium => 3.0,
            Self::Thick => 5.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Thin => "Thin",
            Self::Medium => "Medium",
            Self::Thick => "Thick",
        }
    }
}

/// Color and diameter used to rasterize a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color32,
    pub width: f32,
}

/// Tool configuration read when a stroke begins.
///
/// Each setter returns a new value; the surface swaps the whole thing so a
/// stroke always renders from one consistent configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: [u8; 3],
    pub width: StrokeWidth,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: [0, 0, 0],
            width: StrokeWidth::Medium,
        }
    }
}

impl ToolSettings {
    pub fn with_tool(self, tool: ToolKind) -> Self {
        Self { tool, ..self }
    }

    pub fn with_color(self, color: [u8; 3]) -> Self {
        Self { color, ..self }
    }

    pub fn with_width(self, width: StrokeWidth) -> Self {
        Self { width, ..self }
    }

    pub fn color32(&self) -> Color32 {
        let [r, g, b] = self.color;
        Color32::from_rgb(r, g, b)
    }

    /// Resolve the brush for the next stroke against the canvas background
    pub fn brush(&self, background: Color32) -> Brush {
        match self.tool {
            ToolKind::Pencil => Brush {
                color: self.color32(),
                width: self.width.pixels(),
            },
            ToolKind::Eraser => Brush {
                color: background,
                width: self.width.pixels() * ERASER_SCALE,
            },
        }
    }
}
