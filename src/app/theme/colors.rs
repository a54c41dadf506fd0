//! Color Constants
//!
//! Warm clay browns for chrome, off-white slip for content areas.

use eframe::egui::Color32;

/// Top bar background - Dark umber
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Main background - Deep brown
pub const BG_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Card background - Slip white
pub const CARD_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Showcased card background - Light tan
pub const CARD_SHOWCASED_BG: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Card border - Muted brown
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Image placeholder - Bisque
pub const IMAGE_PLACEHOLDER: Color32 = Color32::from_rgb(0xE6, 0xD7, 0xC7);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Button primary background - Terracotta
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Destructive button background
pub const BUTTON_DANGER: Color32 = Color32::from_rgb(0x8E, 0x2F, 0x24);

/// Accent color for highlights
pub const ACCENT: Color32 = Color32::from_rgb(0xB8, 0x6B, 0x3F);
