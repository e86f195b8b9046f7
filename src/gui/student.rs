use crate::analytics::{self, TimelinePoint};
use crate::board::{Task, TaskBoard, TaskDraft, TaskPriority, TaskStatus};
use crate::calendar::{self, CalendarEvent, EventKind, MonthView};
use crate::gui::app::DevaiApp;
use crate::gui::widgets::{self, Bar};
use crate::teams::Team;
use crate::theme::{parse_color, ThemeConfig};
use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Align, Layout, ProgressBar, RichText, ScrollArea, Ui};

const SPRINT_LABEL: &str = "Sprint 4/6";
const REPO_LABEL: &str = "github.com/team-quantum";
const STUDENT_PROGRESS: u8 = 78;

const OVERVIEW_STATS: [(&str, &str, &str, &str); 4] = [
    ("Total Commits", "143", "+12", widgets::ACCENT_YELLOW),
    ("Team Progress", "78%", "+8%", widgets::ACCENT_ORANGE),
    ("Code Quality", "92%", "+5%", widgets::ACCENT_RED),
    ("Contributions", "1,240", "+342", widgets::ACCENT_YELLOW),
];

const SPRINT_METRICS: [(&str, &str, &str); 3] = [
    ("Sprint Velocity", "24 pts", "+3"),
    ("Code Coverage", "82%", "+5%"),
    ("Open PRs", "3", "2 need review"),
];

const ACTIVITY_FEED: [(&str, &str, &str, &str); 4] = [
    ("Alice", "pushed 3 commits", "10m ago", "frontend"),
    ("Bob", "opened PR #42", "25m ago", "api"),
    ("Charlie", "commented on PR #41", "1h ago", "backend"),
    ("Alice", "merged PR #40", "2h ago", "frontend"),
];

const RECENT_COMMITS: [(&str, &str, &str, &str); 3] = [
    ("Fix navigation bug in dashboard", "frontend", "a1b2c3d", "2h ago"),
    ("Add user authentication flow", "api", "e4f5g6h", "5h ago"),
    ("Update API endpoints", "backend", "i7j8k9l", "1d ago"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentTab {
    #[default]
    Overview,
    Activity,
    Team,
    Kanban,
    Calendar,
}

impl StudentTab {
    pub const ALL: [StudentTab; 5] = [
        StudentTab::Overview,
        StudentTab::Activity,
        StudentTab::Team,
        StudentTab::Kanban,
        StudentTab::Calendar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StudentTab::Overview => "Overview",
            StudentTab::Activity => "Activity",
            StudentTab::Team => "Team",
            StudentTab::Kanban => "Kanban",
            StudentTab::Calendar => "Calendar",
        }
    }
}

/// Everything the student dashboard keeps across tab switches. The weekly
/// series is generated once per session; revisiting a tab never reshuffles
/// or resets anything here.
pub struct StudentState {
    pub active_tab: StudentTab,
    pub week: Vec<TimelinePoint>,
    pub board: TaskBoard,
    pub month: MonthView,
    pub selected_day: Option<NaiveDate>,
    pub events: Vec<CalendarEvent>,
    pub show_add_task: bool,
    pub task_draft: TaskDraft,
}

impl StudentState {
    pub fn new(seed: u64, today: NaiveDate) -> Self {
        let events = calendar::seeded_events();
        // Start the calendar on the seeded schedule so it opens onto
        // something instead of an empty month.
        let month = events
            .first()
            .map(|e| MonthView::containing(e.date))
            .unwrap_or_else(|| MonthView::containing(today));
        Self {
            active_tab: StudentTab::default(),
            week: analytics::weekly_timeline(seed, today),
            board: TaskBoard::with_seed_tasks(),
            month,
            selected_day: None,
            events,
            show_add_task: false,
            task_draft: TaskDraft::default(),
        }
    }
}

pub(super) fn show(app: &mut DevaiApp, ui: &mut Ui) {
    let muted = app.muted_color();
    let accent = app.accent_color();

    let Some(team) = app.teams.first().cloned() else {
        ui.label(RichText::new("No team assigned yet.").color(muted));
        return;
    };

    let mut do_sign_out = false;
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("DevAI")
                .strong()
                .size(app.theme.font_size_base + 8.0)
                .color(accent),
        );
        ui.label(RichText::new(&team.name).color(muted));
        ui.label(RichText::new(SPRINT_LABEL).small().color(muted));
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

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        for tab in StudentTab::ALL {
            if ui
                .selectable_label(app.student.active_tab == tab, tab.label())
                .clicked()
            {
                app.student.active_tab = tab;
            }
        }
    });
    ui.separator();

    ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        match app.student.active_tab {
            StudentTab::Overview => render_overview(app, ui, &team),
            StudentTab::Activity => render_activity(app, ui),
            StudentTab::Team => render_team(app, ui, &team),
            StudentTab::Kanban => render_board(app, ui),
            StudentTab::Calendar => render_calendar(app, ui),
        }
        ui.add_space(20.0);
    });

    render_add_task_modal(app, ui);
}

fn render_overview(app: &mut DevaiApp, ui: &mut Ui, team: &Team) {
    let muted = app.muted_color();

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        for (label, value, note, color) in OVERVIEW_STATS {
            widgets::stat_card(
                ui,
                &app.theme,
                150.0,
                label,
                value,
                &format!("{note} this week"),
                color,
            );
        }
    });

    widgets::section_heading(ui, &app.theme, &format!("{} Progress", team.name));
    widgets::card_frame(&app.theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label("Sprint Completion");
            ui.label(RichText::new(SPRINT_LABEL).small().color(muted));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(REPO_LABEL).small().color(muted));
            });
        });
        ui.add(
            ProgressBar::new(f32::from(STUDENT_PROGRESS) / 100.0)
                .fill(app.accent_color())
                .text(format!("{STUDENT_PROGRESS}%")),
        );
    });

    widgets::section_heading(ui, &app.theme, "Sprint Metrics");
    ui.horizontal_wrapped(|ui| {
        for (label, value, note) in SPRINT_METRICS {
            widgets::stat_card(
                ui,
                &app.theme,
                170.0,
                label,
                value,
                note,
                widgets::ACCENT_ORANGE,
            );
        }
    });

    widgets::section_heading(ui, &app.theme, "Recent Activity");
    for (who, what, when, area) in ACTIVITY_FEED {
        ui.horizontal(|ui| {
            widgets::badge(ui, area, app.accent_color());
            ui.label(RichText::new(who).strong());
            ui.label(what);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(when).small().color(muted));
            });
        });
        ui.add_space(2.0);
    }
}

fn render_activity(app: &mut DevaiApp, ui: &mut Ui) {
    let muted = app.muted_color();

    widgets::section_heading(ui, &app.theme, "Commits this week");
    let bars: Vec<Bar> = app
        .student
        .week
        .iter()
        .map(|p| Bar {
            label: p.date.format("%a").to_string(),
            value: p.commits,
        })
        .collect();
    widgets::bar_chart(ui, &bars, 110.0, app.accent_color(), muted);

    widgets::section_heading(ui, &app.theme, "Recent Commits");
    for (message, area, hash, when) in RECENT_COMMITS {
        widgets::card_frame(&app.theme).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(message).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new(when).small().color(muted));
                });
            });
            ui.horizontal(|ui| {
                widgets::badge(ui, area, app.accent_color());
                ui.label(RichText::new(hash).monospace().small().color(muted));
            });
        });
        ui.add_space(6.0);
    }
}

fn render_team(app: &mut DevaiApp, ui: &mut Ui, team: &Team) {
    let muted = app.muted_color();

    widgets::section_heading(ui, &app.theme, &format!("{} Members", team.name));
    for row in analytics::contributor_rows(&team.members) {
        widgets::card_frame(&app.theme).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(&row.name).strong());
                if team.leader.as_deref() == Some(row.name.as_str()) {
                    widgets::badge(ui, "Team Leader", app.accent_color());
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new("activity").small().color(muted));
                    ui.label(
                        RichText::new(format!("{}%", row.activity_score))
                            .strong()
                            .color(app.accent_color()),
                    );
                });
            });
            ui.label(
                RichText::new(format!(
                    "{} commits • +{}/-{}",
                    row.commits, row.additions, row.deletions
                ))
                .small()
                .color(muted),
            );
        });
        ui.add_space(6.0);
    }
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Repository:").small().color(muted));
        ui.hyperlink_to(&team.repo_url, &team.repo_url);
    });
}

fn render_board(app: &mut DevaiApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Sprint Board")
                .strong()
                .size(app.theme.font_size_base + 3.0),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button(RichText::new("+ Add Task").strong()).clicked() {
                app.student.show_add_task = true;
            }
        });
    });
    ui.add_space(8.0);

    ui.columns(4, |columns| {
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            let ui = &mut columns[i];
            let color = parse_color(status.color());
            ui.horizontal(|ui| {
                ui.label(RichText::new(status.title()).strong().color(color));
                widgets::badge(ui, &app.student.board.count_in(*status).to_string(), color);
            });
            ui.add_space(4.0);
            for task in app.student.board.tasks_in(*status) {
                task_card(ui, &app.theme, task);
            }
        }
    });
}

fn task_card(ui: &mut Ui, theme: &ThemeConfig, task: &Task) {
    let muted = parse_color(&theme.muted_text);
    widgets::card_frame(theme).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(&task.title).strong());
        if !task.description.is_empty() {
            ui.label(RichText::new(&task.description).small().color(muted));
        }
        ui.horizontal(|ui| {
            widgets::badge(ui, task.priority.label(), parse_color(task.priority.color()));
            if let Some(who) = &task.assignee {
                ui.label(RichText::new(who.as_str()).small());
            }
        });
        ui.horizontal(|ui| {
            if let Some(due) = task.due_date {
                ui.label(
                    RichText::new(format!("due {}", due.format("%b %d")))
                        .small()
                        .color(muted),
                );
            }
            if task.comments > 0 {
                ui.label(
                    RichText::new(format!("{} comments", task.comments))
                        .small()
                        .color(muted),
                );
            }
        });
    });
    ui.add_space(6.0);
}

fn render_add_task_modal(app: &mut DevaiApp, ui: &mut Ui) {
    if !app.student.show_add_task {
        return;
    }
    let muted = app.muted_color();
    let mut open = true;
    egui::Window::new("Add Task")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ui.ctx(), |ui| {
            ui.set_width(340.0);
            ui.label(RichText::new("Title").small().color(muted));
            ui.text_edit_singleline(&mut app.student.task_draft.title);
            ui.label(RichText::new("Description").small().color(muted));
            ui.text_edit_multiline(&mut app.student.task_draft.description);
            ui.label(RichText::new("Priority").small().color(muted));
            ui.horizontal(|ui| {
                for priority in TaskPriority::ALL {
                    if ui
                        .selectable_label(
                            app.student.task_draft.priority == priority,
                            priority.label(),
                        )
                        .clicked()
                    {
                        app.student.task_draft.priority = priority;
                    }
                }
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let can_add = !app.student.task_draft.title.trim().is_empty();
                let button = egui::Button::new(RichText::new("Add Task").strong());
                if ui.add_enabled(can_add, button).clicked()
                    && app.student.board.add_task(&app.student.task_draft)
                {
                    app.student.task_draft = TaskDraft::default();
                    app.student.show_add_task = false;
                }
                if ui.button("Cancel").clicked() {
                    app.student.task_draft = TaskDraft::default();
                    app.student.show_add_task = false;
                }
            });
        });
    if !open {
        app.student.show_add_task = false;
        app.student.task_draft = TaskDraft::default();
    }
}

fn render_calendar(app: &mut DevaiApp, ui: &mut Ui) {
    let muted = app.muted_color();

    ui.horizontal(|ui| {
        if ui.button("<").clicked() {
            app.student.month.prev_month();
        }
        ui.label(
            RichText::new(app.student.month.title())
                .strong()
                .size(app.theme.font_size_base + 3.0),
        );
        if ui.button(">").clicked() {
            app.student.month.next_month();
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            for kind in [EventKind::Deadline, EventKind::Review, EventKind::Meeting] {
                widgets::badge(ui, kind.label(), parse_color(kind.color()));
            }
        });
    });
    ui.add_space(8.0);

    let cells = app.student.month.grid();
    let events = app.student.events.clone();
    egui::Grid::new("sprint_calendar")
        .num_columns(7)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for day_name in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"] {
                ui.label(RichText::new(day_name).small().color(muted));
            }
            ui.end_row();
            for week in cells.chunks(7) {
                for cell in week {
                    match cell {
                        Some(date) => day_cell(app, ui, *date, &events),
                        None => {
                            ui.label("");
                        }
                    }
                }
                ui.end_row();
            }
        });

    if let Some(day) = app.student.selected_day {
        widgets::section_heading(
            ui,
            &app.theme,
            &format!("Events on {}", day.format("%B %d, %Y")),
        );
        let todays = calendar::events_on(&events, day);
        if todays.is_empty() {
            ui.label(RichText::new("No events scheduled for this day").color(muted));
        } else {
            for event in todays {
                widgets::card_frame(&app.theme).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        widgets::badge(ui, event.kind.label(), parse_color(event.kind.color()));
                        ui.label(RichText::new(&event.title).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(RichText::new(&event.time).small().color(muted));
                        });
                    });
                    if !event.participants.is_empty() {
                        ui.label(
                            RichText::new(event.participants.join(", "))
                                .small()
                                .color(muted),
                        );
                    }
                });
                ui.add_space(6.0);
            }
        }
    }
}

fn day_cell(app: &mut DevaiApp, ui: &mut Ui, date: NaiveDate, events: &[CalendarEvent]) {
    let day_events = calendar::events_on(events, date);
    let selected = app.student.selected_day == Some(date);
    ui.vertical(|ui| {
        if ui
            .selectable_label(selected, date.day().to_string())
            .clicked()
        {
            app.student.selected_day = Some(date);
        }
        ui.horizontal(|ui| {
            for event in &day_events {
                ui.label(RichText::new("•").color(parse_color(event.kind.color())));
            }
        });
    });
}
