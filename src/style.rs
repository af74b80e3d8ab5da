use egui::Color32;
use serde::{Deserialize, Serialize};

/// Canvas background, also the color a cleared canvas is filled with.
pub const BACKGROUND: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);

/// Brush colors offered by the controls panel.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(0xFF, 0xFF, 0xFF),
    Color32::from_rgb(0xEF, 0x44, 0x44),
    Color32::from_rgb(0xF9, 0x73, 0x16),
    Color32::from_rgb(0xEA, 0xB3, 0x08),
    Color32::from_rgb(0x22, 0xC5, 0x5E),
    Color32::from_rgb(0x0E, 0xA5, 0xE9),
    Color32::from_rgb(0x63, 0x66, 0xF1),
    Color32::from_rgb(0xEC, 0x48, 0x99),
    Color32::from_rgb(0x8B, 0x5C, 0xF6),
    Color32::from_rgb(0x00, 0x00, 0x00),
];

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Art style the generated character is rendered in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStyle {
    #[default]
    Classic2dCartoon,
    AnimeChibi,
    PixelArtSprite,
    Modern3dAnimation,
    WhimsicalStorybook,
    CuteMascot,
    GraffitiArt,
}

impl CharacterStyle {
    /// All styles in the order the selector lists them.
    pub const ALL: [CharacterStyle; 7] = [
        CharacterStyle::Classic2dCartoon,
        CharacterStyle::AnimeChibi,
        CharacterStyle::PixelArtSprite,
        CharacterStyle::Modern3dAnimation,
        CharacterStyle::WhimsicalStorybook,
        CharacterStyle::CuteMascot,
        CharacterStyle::GraffitiArt,
    ];

    /// Label shown in the selector and embedded in the rendering prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic2dCartoon => "Classic 2D Cartoon",
            Self::AnimeChibi => "Anime Chibi",
            Self::PixelArtSprite => "Pixel Art Sprite",
            Self::Modern3dAnimation => "Modern 3D Animation Style",
            Self::WhimsicalStorybook => "Whimsical Storybook Illustration",
            Self::CuteMascot => "Cute Mascot",
            Self::GraffitiArt => "Graffiti Art",
        }
    }
}

impl std::fmt::Display for CharacterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
