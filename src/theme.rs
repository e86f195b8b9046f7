use eframe::egui::{self, Color32, Context, Rounding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_THEME: &str = "devai_dark";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    pub surface: String,
    pub panel: String,
    pub text: String,
    pub muted_text: String,
    pub accent: String,
    pub accent_soft: String,
    pub border: String,
    pub radius: f32,
    pub shadow: f32,
    pub font_size_base: f32,
}

pub fn themes_dir(base: &Path) -> PathBuf {
    base.join("themes")
}

pub fn theme_file(base: &Path) -> PathBuf {
    themes_dir(base).join("theme.json")
}

pub fn presets_file(base: &Path) -> PathBuf {
    themes_dir(base).join("presets.json")
}

pub fn ensure_theme_files(base: &Path) -> io::Result<()> {
    let dir = themes_dir(base);
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    let presets_path = presets_file(base);
    if !presets_path.exists() {
        let presets = default_presets();
        let json = serde_json::to_string_pretty(&presets)?;
        fs::write(&presets_path, json)?;
    }

    let active_path = theme_file(base);
    if !active_path.exists() {
        let default_theme = default_presets()
            .into_iter()
            .find(|t| t.name == DEFAULT_THEME)
            .unwrap_or_else(|| default_presets()[0].clone());
        let json = serde_json::to_string_pretty(&default_theme)?;
        fs::write(&active_path, json)?;
    }

    Ok(())
}

pub fn load_presets(base: &Path) -> Vec<ThemeConfig> {
    let presets_path = presets_file(base);
    if let Ok(contents) = fs::read_to_string(&presets_path) {
        if let Ok(list) = serde_json::from_str::<Vec<ThemeConfig>>(&contents) {
            return list;
        }
    }
    default_presets()
}

pub fn load_theme(base: &Path, preferred: Option<&str>) -> ThemeConfig {
    let presets = load_presets(base);
    if let Some(name) = preferred {
        if let Some(found) = presets.iter().find(|p| p.name == name) {
            return found.clone();
        }
    }

    let active_path = theme_file(base);
    if let Ok(contents) = fs::read_to_string(&active_path) {
        if let Ok(theme) = serde_json::from_str::<ThemeConfig>(&contents) {
            return theme;
        }
    }

    presets
        .into_iter()
        .find(|t| t.name == DEFAULT_THEME)
        .unwrap_or_else(|| default_presets()[0].clone())
}

pub fn save_theme(base: &Path, theme: &ThemeConfig) -> io::Result<()> {
    let json = serde_json::to_string_pretty(theme)?;
    fs::write(theme_file(base), json)?;
    Ok(())
}

pub fn apply_theme(theme: &ThemeConfig, ctx: &Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = if is_dark(theme) {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    let surface = parse_color(&theme.surface);
    let panel = parse_color(&theme.panel);
    let text = parse_color(&theme.text);
    let accent = parse_color(&theme.accent);
    let accent_soft = parse_color(&theme.accent_soft);
    let border = parse_color(&theme.border);

    // Panels sit on the surface color; cards and windows use the panel
    // color one step above it.
    visuals.panel_fill = surface;
    visuals.window_fill = panel;
    visuals.extreme_bg_color = surface;
    visuals.hyperlink_color = accent;
    visuals.selection.bg_fill = accent_soft;
    visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    visuals.widgets.noninteractive.bg_fill = panel;
    visuals.widgets.noninteractive.fg_stroke.color = text;
    visuals.widgets.noninteractive.bg_stroke.color = border;

    visuals.widgets.inactive.bg_fill = panel;
    visuals.widgets.inactive.fg_stroke.color = text;
    visuals.widgets.inactive.bg_stroke.color = border;

    visuals.widgets.hovered.bg_fill = accent_soft;
    visuals.widgets.hovered.bg_stroke.color = accent;
    visuals.widgets.hovered.fg_stroke.color = text;

    visuals.widgets.active.bg_fill = accent_soft;
    visuals.widgets.active.bg_stroke.color = accent;
    visuals.widgets.active.fg_stroke.color = text;

    let rounding = Rounding::same(theme.radius);
    visuals.window_rounding = rounding;
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = rounding;
    }

    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 6.0),
        blur: theme.shadow,
        spread: 0.0,
        color: Color32::from_black_alpha(80),
    };
    visuals.popup_shadow = visuals.window_shadow;

    style.text_styles = [
        (
            egui::TextStyle::Small,
            egui::FontId::proportional(theme.font_size_base - 3.0),
        ),
        (
            egui::TextStyle::Body,
            egui::FontId::proportional(theme.font_size_base),
        ),
        (
            egui::TextStyle::Button,
            egui::FontId::proportional(theme.font_size_base),
        ),
        (
            egui::TextStyle::Heading,
            egui::FontId::proportional(theme.font_size_base + 7.0),
        ),
        (
            egui::TextStyle::Monospace,
            egui::FontId::monospace(theme.font_size_base - 2.0),
        ),
    ]
    .into();
    style.visuals = visuals;
    ctx.set_style(style);
}

fn is_dark(theme: &ThemeConfig) -> bool {
    let bg = parse_color(&theme.surface);
    // Perceptual luminance; below the midpoint counts as dark.
    let luminance =
        0.2126 * f32::from(bg.r()) + 0.7152 * f32::from(bg.g()) + 0.0722 * f32::from(bg.b());
    luminance < 128.0
}

pub fn parse_color(hex: &str) -> Color32 {
    let h = hex.trim_start_matches('#');
    match (h.len(), u32::from_str_radix(h, 16)) {
        (6, Ok(rgb)) => Color32::from_rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        ),
        (8, Ok(rgba)) => Color32::from_rgba_premultiplied(
            ((rgba >> 24) & 0xFF) as u8,
            ((rgba >> 16) & 0xFF) as u8,
            ((rgba >> 8) & 0xFF) as u8,
            (rgba & 0xFF) as u8,
        ),
        _ => Color32::LIGHT_GRAY,
    }
}

pub fn default_presets() -> Vec<ThemeConfig> {
    vec![
        ThemeConfig {
            name: "devai_dark".to_string(),
            surface: "#0a0a0a".to_string(),
            panel: "#151515".to_string(),
            text: "#ffffff".to_string(),
            muted_text: "#9a9a9a".to_string(),
            accent: "#ffde22".to_string(),
            accent_soft: "#3d3408".to_string(),
            border: "#2a2a2a".to_string(),
            radius: 10.0,
            shadow: 12.0,
            font_size_base: 15.0,
        },
        ThemeConfig {
            name: "devai_light".to_string(),
            surface: "#f7f7f5".to_string(),
            panel: "#ffffff".to_string(),
            text: "#16161a".to_string(),
            muted_text: "#6b6b76".to_string(),
            accent: "#ff8928".to_string(),
            accent_soft: "#ffe9d2".to_string(),
            border: "#dddddd".to_string(),
            radius: 10.0,
            shadow: 8.0,
            font_size_base: 15.0,
        },
        ThemeConfig {
            name: "high_contrast".to_string(),
            surface: "#000000".to_string(),
            panel: "#0d0d0d".to_string(),
            text: "#ffffff".to_string(),
            muted_text: "#c7c7c7".to_string(),
            accent: "#ffde22".to_string(),
            accent_soft: "#4d3b00".to_string(),
            border: "#ffffff".to_string(),
            radius: 0.0,
            shadow: 4.0,
            font_size_base: 17.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn hex_colors_parse_in_six_and_eight_digit_forms() {
        assert_eq!(parse_color("#ffde22"), Color32::from_rgb(0xff, 0xde, 0x22));
        assert_eq!(parse_color("10b981"), Color32::from_rgb(0x10, 0xb9, 0x81));
        assert_eq!(
            parse_color("#00000080"),
            Color32::from_rgba_premultiplied(0, 0, 0, 0x80)
        );
        assert_eq!(parse_color("nonsense"), Color32::LIGHT_GRAY);
    }

    #[test]
    fn bundled_presets_classify_light_and_dark_correctly() {
        let presets = default_presets();
        let dark = presets.iter().find(|p| p.name == DEFAULT_THEME).unwrap();
        let light = presets.iter().find(|p| p.name == "devai_light").unwrap();
        assert!(is_dark(dark));
        assert!(!is_dark(light));
    }

    #[test]
    fn theme_files_are_created_and_preferred_name_wins() {
        let dir = tempdir().unwrap();
        ensure_theme_files(dir.path()).unwrap();
        assert!(presets_file(dir.path()).exists());
        assert!(theme_file(dir.path()).exists());

        let theme = load_theme(dir.path(), Some("devai_light"));
        assert_eq!(theme.name, "devai_light");
        // Unknown names fall back to the persisted active theme.
        let fallback = load_theme(dir.path(), Some("no_such_theme"));
        assert_eq!(fallback.name, DEFAULT_THEME);
    }
}
