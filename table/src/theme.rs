//! Theme tokens consumed by the table.

use egui::{Color32, Stroke, Visuals};

/// Border color for the light palette (subtle gray).
const LIGHT_BORDER: Color32 = Color32::from_rgb(200, 200, 200);

/// Header background for the light palette (light gray).
const LIGHT_SURFACE: Color32 = Color32::from_rgb(245, 245, 245);

const DARK_BORDER: Color32 = Color32::from_rgb(72, 72, 72);

const DARK_SURFACE: Color32 = Color32::from_rgb(36, 36, 36);

/// Two neutral-palette tokens: the outline of the table and its separators,
/// and the header background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTheme {
    pub border: Color32,
    pub surface: Color32,
}

impl TableTheme {
    pub const fn light() -> Self {
        Self {
            border: LIGHT_BORDER,
            surface: LIGHT_SURFACE,
        }
    }

    pub const fn dark() -> Self {
        Self {
            border: DARK_BORDER,
            surface: DARK_SURFACE,
        }
    }

    /// Picks the palette matching the current visuals.
    pub fn from_visuals(visuals: &Visuals) -> Self {
        if visuals.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// One point wide stroke in the border color.
    #[inline]
    pub fn border_stroke(&self) -> Stroke {
        Stroke::new(1.0, self.border)
    }
}

impl Default for TableTheme {
    fn default() -> Self {
        Self::light()
    }
}
