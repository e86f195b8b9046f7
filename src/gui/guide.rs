use crate::analytics::{self, InsightKind, TeamAnalytics};
use crate::gui::app::DevaiApp;
use crate::gui::widgets::{self, Bar};
use crate::teams::{self, Team, TeamDraft};
use crate::theme::{parse_color, ThemeConfig};
use eframe::egui::{
    self, Align, Color32, Layout, ProgressBar, RichText, ScrollArea, Stroke, TextEdit, Ui,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Default)]
pub struct GuideState {
    pub search: String,
    pub view_mode: ViewMode,
    pub selected_team: Option<String>,
    pub show_add_modal: bool,
    pub draft: TeamDraft,
    /// Generated analytics per team id. Filled once per selection and only
    /// cleared by an explicit refresh.
    pub analytics: HashMap<String, TeamAnalytics>,
    pub refresh_nonce: u64,
}

pub(super) fn show(app: &mut DevaiApp, ui: &mut Ui) {
    let muted = app.muted_color();
    let accent = app.accent_color();

    let mut do_sign_out = false;
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("DevAI")
                .strong()
                .size(app.theme.font_size_base + 8.0)
                .color(accent),
        );
        ui.label(RichText::new("Guide Dashboard").color(muted));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Sign out").clicked() {
                do_sign_out = true;
            }
            if let Some(user) = app.session.current() {
                ui.label(
                    RichText::new(format!("Welcome, {}", user.display_name)).color(muted),
                );
            }
        });
    });
    if do_sign_out {
        app.sign_out();
        return;
    }

    let stats = teams::roster_stats(&app.teams);
    ui.add_space(8.0);
    ui.horizontal_wrapped(|ui| {
        widgets::stat_card(
            ui,
            &app.theme,
            150.0,
            "Total Groups",
            &stats.groups.to_string(),
            "",
            widgets::ACCENT_YELLOW,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            150.0,
            "Total Commits",
            &stats.commits.to_string(),
            "",
            widgets::ACCENT_ORANGE,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            150.0,
            "Avg Progress",
            &format!("{}%", stats.avg_progress),
            "",
            widgets::ACCENT_RED,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            150.0,
            "Students",
            &stats.students.to_string(),
            "",
            widgets::ACCENT_GREEN,
        );
    });

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(&mut app.guide.search)
                .hint_text("Search teams or students...")
                .desired_width(260.0),
        );
        for (mode, label) in [(ViewMode::Grid, "Grid"), (ViewMode::List, "List")] {
            if ui
                .selectable_label(app.guide.view_mode == mode, label)
                .clicked()
            {
                app.guide.view_mode = mode;
            }
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button(RichText::new("+ Add Team").strong()).clicked() {
                app.guide.show_add_modal = true;
            }
        });
    });

    ui.add_space(8.0);
    ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        render_teams(app, ui);
        if let Some(team_id) = app.guide.selected_team.clone() {
            render_analytics(app, ui, &team_id);
        }
        ui.add_space(20.0);
    });

    render_add_modal(app, ui);
}

fn render_teams(app: &mut DevaiApp, ui: &mut Ui) {
    let filtered: Vec<Team> = teams::filter_teams(&app.teams, &app.guide.search)
        .into_iter()
        .cloned()
        .collect();

    if filtered.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No teams match your search.").color(app.muted_color()));
        });
        return;
    }

    let mut clicked: Option<String> = None;
    match app.guide.view_mode {
        ViewMode::Grid => {
            ui.horizontal_wrapped(|ui| {
                for team in &filtered {
                    let selected = app.guide.selected_team.as_deref() == Some(team.id.as_str());
                    if team_card(ui, &app.theme, team, selected) {
                        clicked = Some(team.id.clone());
                    }
                }
            });
        }
        ViewMode::List => {
            for team in &filtered {
                let selected = app.guide.selected_team.as_deref() == Some(team.id.as_str());
                if team_row(ui, &app.theme, team, selected) {
                    clicked = Some(team.id.clone());
                }
                ui.add_space(6.0);
            }
        }
    }

    if let Some(id) = clicked {
        select_team(app, &id);
    }
}

/// Toggles the analytics panel for a team. Opening a team the first time
/// kicks off the simulated fetch; reopening reuses the cached numbers.
fn select_team(app: &mut DevaiApp, team_id: &str) {
    // Any in-flight fetch belongs to the previous selection.
    if app.fetching_team().is_some() {
        app.cancel_pending();
    }
    if app.guide.selected_team.as_deref() == Some(team_id) {
        app.guide.selected_team = None;
        return;
    }
    app.guide.selected_team = Some(team_id.to_string());
    if !app.guide.analytics.contains_key(team_id) {
        app.begin_analytics_fetch(team_id.to_string());
    }
}

fn team_card(ui: &mut Ui, theme: &ThemeConfig, team: &Team, selected: bool) -> bool {
    let muted = parse_color(&theme.muted_text);
    let mut open = false;
    let mut frame = widgets::card_frame(theme);
    if selected {
        frame = frame.stroke(Stroke::new(1.5, parse_color(&theme.accent)));
    }
    frame.show(ui, |ui| {
        ui.set_width(300.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(&team.name)
                    .strong()
                    .size(theme.font_size_base + 2.0),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                widgets::badge(
                    ui,
                    &team.activity_score.to_string(),
                    parse_color(score_color(team.activity_score)),
                );
            });
        });
        if let Some(leader) = &team.leader {
            ui.label(
                RichText::new(format!("Lead: {leader}"))
                    .small()
                    .color(muted),
            );
        }
        ui.label(
            RichText::new(format!(
                "{} members | active {}",
                team.members.len(),
                team.last_active
            ))
            .small()
            .color(muted),
        );
        ui.add_space(6.0);
        ui.add(
            ProgressBar::new(f32::from(team.progress) / 100.0)
                .fill(parse_color(progress_color(team.progress)))
                .text(format!("{}%", team.progress)),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} commits", team.commits)).small());
            ui.label(
                RichText::new(format!("+{}", team.additions))
                    .small()
                    .color(parse_color(widgets::ACCENT_GREEN)),
            );
            ui.label(
                RichText::new(format!("-{}", team.deletions))
                    .small()
                    .color(parse_color(widgets::ACCENT_RED)),
            );
        });
        ui.horizontal_wrapped(|ui| {
            for tech in &team.tech {
                widgets::badge(ui, tech, parse_color(&theme.accent));
            }
        });
        ui.add_space(6.0);
        let label = if selected { "Hide analytics" } else { "View analytics" };
        if ui.button(label).clicked() {
            open = true;
        }
    });
    open
}

fn team_row(ui: &mut Ui, theme: &ThemeConfig, team: &Team, selected: bool) -> bool {
    let muted = parse_color(&theme.muted_text);
    let mut open = false;
    let mut frame = widgets::card_frame(theme);
    if selected {
        frame = frame.stroke(Stroke::new(1.5, parse_color(&theme.accent)));
    }
    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(&team.name).strong());
                if let Some(leader) = &team.leader {
                    ui.label(RichText::new(leader.as_str()).small().color(muted));
                }
            });
            ui.add_space(12.0);
            ui.add(
                ProgressBar::new(f32::from(team.progress) / 100.0)
                    .desired_width(180.0)
                    .fill(parse_color(progress_color(team.progress)))
                    .text(format!("{}%", team.progress)),
            );
            ui.label(RichText::new(format!("{} commits", team.commits)).small());
            ui.label(
                RichText::new(format!("{} members", team.members.len()))
                    .small()
                    .color(muted),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if selected { "Hide" } else { "Analytics" };
                if ui.button(label).clicked() {
                    open = true;
                }
                widgets::badge(
                    ui,
                    &team.activity_score.to_string(),
                    parse_color(score_color(team.activity_score)),
                );
            });
        });
    });
    open
}

fn render_analytics(app: &mut DevaiApp, ui: &mut Ui, team_id: &str) {
    let muted = app.muted_color();
    let Some(team) = app.teams.iter().find(|t| t.id == team_id).cloned() else {
        return;
    };
    widgets::section_heading(ui, &app.theme, &format!("{} Analytics", team.name));

    let Some(data) = app.guide.analytics.get(team_id).cloned() else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Crunching repository data...").color(muted));
        });
        if app.fetching_team() != Some(team_id) {
            app.begin_analytics_fetch(team_id.to_string());
        }
        return;
    };

    ui.horizontal(|ui| {
        if ui.button("Refresh").clicked() {
            app.guide.refresh_nonce += 1;
            app.guide.analytics.remove(team_id);
            app.begin_analytics_fetch(team_id.to_string());
        }
        ui.label(
            RichText::new("Numbers are generated locally for this session.")
                .small()
                .color(muted),
        );
    });
    ui.add_space(6.0);

    ui.horizontal_wrapped(|ui| {
        widgets::stat_card(
            ui,
            &app.theme,
            140.0,
            "Commits",
            &data.summary.total_commits.to_string(),
            "",
            widgets::ACCENT_YELLOW,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            140.0,
            "Contributors",
            &data.summary.total_contributors.to_string(),
            "",
            widgets::ACCENT_ORANGE,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            140.0,
            "Additions",
            &format!("+{}", data.summary.total_additions),
            "",
            widgets::ACCENT_GREEN,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            140.0,
            "Deletions",
            &format!("-{}", data.summary.total_deletions),
            "",
            widgets::ACCENT_RED,
        );
        widgets::stat_card(
            ui,
            &app.theme,
            140.0,
            "Active Days",
            &data.summary.active_days.to_string(),
            "",
            widgets::ACCENT_YELLOW,
        );
    });

    widgets::section_heading(ui, &app.theme, "Commits over the last 30 days");
    let bars: Vec<Bar> = data
        .timeline
        .iter()
        .enumerate()
        .map(|(i, point)| Bar {
            label: if i % 5 == 0 {
                point.date.format("%d %b").to_string()
            } else {
                String::new()
            },
            value: point.commits,
        })
        .collect();
    widgets::bar_chart(ui, &bars, 120.0, app.accent_color(), muted);

    widgets::section_heading(ui, &app.theme, "Contributors");
    for row in &data.contributors {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&row.name).strong());
            ui.label(
                RichText::new(format!(
                    "{} commits  +{}  -{}",
                    row.commits, row.additions, row.deletions
                ))
                .small()
                .color(muted),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                widgets::badge(
                    ui,
                    &row.activity_score.to_string(),
                    parse_color(score_color(row.activity_score)),
                );
            });
        });
        ui.add(
            ProgressBar::new(f32::from(row.progress) / 100.0)
                .fill(parse_color(progress_color(row.progress)))
                .text(format!("{}%", row.progress)),
        );
        ui.add_space(4.0);
    }

    render_insights(ui, &app.theme, &team, muted);
}

fn render_insights(ui: &mut Ui, theme: &ThemeConfig, team: &Team, muted: Color32) {
    widgets::section_heading(ui, theme, "AI Insights");
    for insight in analytics::team_insights(team) {
        let color = parse_color(insight_color(insight.kind));
        widgets::card_frame(theme).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                widgets::badge(ui, insight_label(insight.kind), color);
                ui.label(RichText::new(insight.time).small().color(muted));
            });
            ui.label(&insight.message);
        });
        ui.add_space(6.0);
    }
}

fn render_add_modal(app: &mut DevaiApp, ui: &mut Ui) {
    if !app.guide.show_add_modal {
        return;
    }
    let muted = app.muted_color();
    let mut open = true;
    egui::Window::new("Create New Team")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ui.ctx(), |ui| {
            ui.set_width(360.0);
            ui.label(RichText::new("Team Name").small().color(muted));
            ui.text_edit_singleline(&mut app.guide.draft.name);
            ui.label(RichText::new("Repository URL").small().color(muted));
            ui.text_edit_singleline(&mut app.guide.draft.repo_url);
            ui.label(RichText::new("Team Leader").small().color(muted));
            ui.text_edit_singleline(&mut app.guide.draft.leader);
            ui.label(RichText::new("Members (comma separated)").small().color(muted));
            ui.text_edit_singleline(&mut app.guide.draft.members_input);
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let create = egui::Button::new(RichText::new("Create Team").strong());
                if ui.add_enabled(app.guide.draft.is_valid(), create).clicked() {
                    let team = app.guide.draft.build(app.teams.len() + 1);
                    log::info!("created {} with {} member(s)", team.name, team.members.len());
                    app.teams.push(team);
                    app.guide.draft = TeamDraft::default();
                    app.guide.show_add_modal = false;
                }
                if ui.button("Cancel").clicked() {
                    app.guide.draft = TeamDraft::default();
                    app.guide.show_add_modal = false;
                }
            });
        });
    if !open {
        app.guide.show_add_modal = false;
        app.guide.draft = TeamDraft::default();
    }
}

fn score_color(score: u8) -> &'static str {
    if score >= 80 {
        widgets::ACCENT_GREEN
    } else if score >= 60 {
        widgets::ACCENT_YELLOW
    } else {
        widgets::ACCENT_RED
    }
}

fn progress_color(progress: u8) -> &'static str {
    if progress >= 70 {
        widgets::ACCENT_GREEN
    } else if progress >= 40 {
        widgets::ACCENT_ORANGE
    } else {
        widgets::ACCENT_RED
    }
}

fn insight_color(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => widgets::ACCENT_RED,
        InsightKind::Success => widgets::ACCENT_YELLOW,
        InsightKind::Tip => widgets::ACCENT_ORANGE,
    }
}

fn insight_label(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "warning",
        InsightKind::Success => "success",
        InsightKind::Tip => "insight",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use tempfile::tempdir;

    fn test_app(dir: &std::path::Path) -> DevaiApp {
        let settings = Settings {
            version: "test".to_string(),
            base_path: dir.to_string_lossy().to_string(),
            mode: "gui".to_string(),
            latency: Default::default(),
            ui: Default::default(),
        };
        DevaiApp::bootstrap(dir.to_path_buf(), settings, 11)
    }

    #[test]
    fn selecting_a_team_twice_toggles_the_panel_closed() {
        let dir = tempdir().unwrap();
        let mut app = test_app(dir.path());
        select_team(&mut app, "1");
        assert_eq!(app.guide.selected_team.as_deref(), Some("1"));
        select_team(&mut app, "1");
        assert_eq!(app.guide.selected_team, None);
    }

    #[test]
    fn deselecting_cancels_the_fetch_and_cache_hits_skip_it() {
        let dir = tempdir().unwrap();
        let mut app = test_app(dir.path());
        select_team(&mut app, "2");
        assert_eq!(app.fetching_team(), Some("2"));

        // Closing the panel drops the in-flight fetch.
        select_team(&mut app, "2");
        assert_eq!(app.fetching_team(), None);

        // With cached numbers, reopening does not fetch again.
        app.guide.analytics.insert(
            "2".to_string(),
            TeamAnalytics::generate(
                &app.teams[1],
                0,
                chrono::NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(),
            ),
        );
        select_team(&mut app, "2");
        assert_eq!(app.guide.selected_team.as_deref(), Some("2"));
        assert_eq!(app.fetching_team(), None);
    }

    #[test]
    fn score_and_progress_colors_follow_the_thresholds() {
        assert_eq!(score_color(98), widgets::ACCENT_GREEN);
        assert_eq!(score_color(76), widgets::ACCENT_YELLOW);
        assert_eq!(score_color(52), widgets::ACCENT_RED);
        assert_eq!(progress_color(85), widgets::ACCENT_GREEN);
        assert_eq!(progress_color(45), widgets::ACCENT_ORANGE);
        assert_eq!(progress_color(10), widgets::ACCENT_RED);
    }
}
