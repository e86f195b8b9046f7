use crate::theme::{parse_color, ThemeConfig};
use eframe::egui::{self, Align2, Color32, FontId, RichText, Rounding, Sense, Stroke, Ui};

// Brand palette shared by both dashboards. Kept as hex so the values line
// up with the ones stored in theme presets and column definitions.
pub(super) const ACCENT_YELLOW: &str = "#ffde22";
pub(super) const ACCENT_ORANGE: &str = "#ff8928";
pub(super) const ACCENT_RED: &str = "#ff414e";
pub(super) const ACCENT_GREEN: &str = "#10b981";

pub(super) fn card_frame(theme: &ThemeConfig) -> egui::Frame {
    egui::Frame::none()
        .fill(parse_color(&theme.panel))
        .stroke(Stroke::new(1.0, parse_color(&theme.border)))
        .rounding(Rounding::same(theme.radius))
        .inner_margin(egui::Margin::symmetric(14.0, 12.0))
}

/// Small framed metric: label on top, large value, optional trend note
/// underneath in the given accent color.
pub(super) fn stat_card(
    ui: &mut Ui,
    theme: &ThemeConfig,
    width: f32,
    label: &str,
    value: &str,
    note: &str,
    note_color: &str,
) {
    card_frame(theme).show(ui, |ui| {
        ui.set_min_width(width);
        ui.vertical(|ui| {
            ui.label(
                RichText::new(label)
                    .small()
                    .color(parse_color(&theme.muted_text)),
            );
            ui.label(
                RichText::new(value)
                    .strong()
                    .size(theme.font_size_base + 8.0),
            );
            if !note.is_empty() {
                ui.label(RichText::new(note).small().color(parse_color(note_color)));
            }
        });
    });
}

pub(super) fn section_heading(ui: &mut Ui, theme: &ThemeConfig, title: &str) {
    ui.add_space(14.0);
    ui.label(
        RichText::new(title)
            .strong()
            .size(theme.font_size_base + 3.0),
    );
    ui.add_space(6.0);
}

/// Pill-shaped tag, tinted with a translucent version of its color.
pub(super) fn badge(ui: &mut Ui, text: &str, color: Color32) {
    egui::Frame::none()
        .fill(color.gamma_multiply(0.18))
        .rounding(Rounding::same(8.0))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().color(color));
        });
}

pub(super) struct Bar {
    pub label: String,
    pub value: u32,
}

/// Minimal painted bar chart. Bars are scaled against the series maximum;
/// labels are drawn under their bar and may be empty to thin out dense
/// series.
pub(super) fn bar_chart(
    ui: &mut Ui,
    bars: &[Bar],
    height: f32,
    fill: Color32,
    label_color: Color32,
) {
    if bars.is_empty() {
        return;
    }
    let max = bars.iter().map(|b| b.value).max().unwrap_or(1).max(1) as f32;
    let label_height = 16.0;
    let gap = 4.0;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height + label_height),
        Sense::hover(),
    );
    let painter = ui.painter();
    let count = bars.len() as f32;
    let bar_width = ((rect.width() - gap * (count - 1.0)) / count).max(1.0);

    for (i, bar) in bars.iter().enumerate() {
        let h = (bar.value as f32 / max) * height;
        let left = rect.left() + i as f32 * (bar_width + gap);
        let body = egui::Rect::from_min_max(
            egui::pos2(left, rect.top() + height - h),
            egui::pos2(left + bar_width, rect.top() + height),
        );
        painter.rect_filled(
            body,
            Rounding {
                nw: 3.0,
                ne: 3.0,
                sw: 0.0,
                se: 0.0,
            },
            fill,
        );
        if !bar.label.is_empty() {
            painter.text(
                egui::pos2(left + bar_width / 2.0, rect.bottom()),
                Align2::CENTER_BOTTOM,
                &bar.label,
                FontId::proportional(10.0),
                label_color,
            );
        }
    }
}
