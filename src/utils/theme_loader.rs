use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::internal::theme_pref::ThemeMode;

/// Default palette shipped in the binary; light and dark variants.
const EMBEDDED_THEME_JSON: &str = include_str!("../../assets/theme.json");

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFile {
    #[allow(dead_code)]
    pub name: String,
    pub themes: Vec<ThemeVariant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    #[allow(dead_code)]
    pub name: String,
    pub mode: String, // "light" or "dark"
    pub colors: HashMap<String, String>,
}

/// Resolved palette used by the renderer.
#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub background: Color,
    pub foreground: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub border: Color,
    pub author: Color,
    pub meta: Color,
    pub tag: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            border: Color::White,
            author: Color::Blue,
            meta: Color::DarkGray,
            tag: Color::Cyan,
            highlight_bg: Color::Yellow,
            highlight_fg: Color::Black,
        }
    }
}

/// Load a theme variant from a JSON theme file on disk.
pub fn load_theme(path: &Path, mode: ThemeMode) -> Result<TuiTheme> {
    let content = fs::read_to_string(path).context("Failed to read theme file")?;
    theme_for_mode(&content, mode)
}

/// The embedded default palette for `mode`. Falls back to `TuiTheme::default`
/// if the shipped JSON is somehow unparseable.
pub fn embedded_theme(mode: ThemeMode) -> TuiTheme {
    theme_for_mode(EMBEDDED_THEME_JSON, mode).unwrap_or_else(|e| {
        tracing::error!("Embedded theme failed to parse: {}", e);
        TuiTheme::default()
    })
}

fn theme_for_mode(json: &str, mode: ThemeMode) -> Result<TuiTheme> {
    let theme_file: ThemeFile =
        serde_json::from_str(json).context("Failed to parse theme JSON")?;

    let wanted = mode.to_string();
    let variant = theme_file
        .themes
        .iter()
        .find(|t| t.mode == wanted)
        .or_else(|| theme_file.themes.first())
        .context("No matching theme variant found")?;

    let color = |key: &str, fallback: &str| -> Color {
        parse_color(variant.colors.get(key).map(String::as_str).unwrap_or(fallback))
    };

    Ok(TuiTheme {
        background: color("background", "#000000"),
        foreground: color("foreground", "#ffffff"),
        selection_bg: parse_color(
            variant
                .colors
                .get("selection.background")
                .or_else(|| variant.colors.get("primary.background"))
                .map(String::as_str)
                .unwrap_or("#0000ff"),
        ),
        selection_fg: parse_color(
            variant
                .colors
                .get("accent.foreground")
                .or_else(|| variant.colors.get("foreground"))
                .map(String::as_str)
                .unwrap_or("#ffffff"),
        ),
        border: color("border", "#ffffff"),
        author: color("base.blue", "#0000ff"),
        meta: color("muted.foreground", "#808080"),
        tag: color("base.cyan", "#00ffff"),
        highlight_bg: color("base.yellow", "#ffff00"),
        highlight_fg: color("highlight.foreground", "#000000"),
    })
}

fn parse_color(hex: &str) -> Color {
    if let Ok(c) = hex.parse::<Color>() {
        return c;
    }

    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 | 8 => {
            // For 8-char hex (with alpha), ignore the alpha and use the RGB components.
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}
