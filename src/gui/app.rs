use crate::accounts::AccountDirectory;
use crate::analytics::{self, TeamAnalytics};
use crate::gui::guide::{self, GuideState};
use crate::gui::login::{self, LoginForm};
use crate::gui::student::{self, StudentState};
use crate::gui::widgets;
use crate::routes::{self, RouteDecision, Screen};
use crate::session::{Identity, SessionStore};
use crate::settings::{save_settings, Settings};
use crate::teams::{seeded_teams, Team};
use crate::theme::{
    apply_theme, ensure_theme_files, load_presets, load_theme, parse_color, save_theme,
    ThemeConfig,
};
use chrono::Local;
use eframe::{
    egui::{
        self, menu, Align, CentralPanel, Color32, Context, Layout, RichText, TopBottomPanel,
    },
    App, CreationContext,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const LANDING_FEATURES: [(&str, &str); 3] = [
    (
        "Commit analytics",
        "Daily activity, additions and deletions for every team repository.",
    ),
    (
        "Team progress",
        "Progress, velocity and coverage at a glance across the whole course.",
    ),
    (
        "Sprint board",
        "A kanban board and sprint calendar for day-to-day coordination.",
    ),
];

/// Work the app has started but deliberately not finished yet. The mock
/// backend answers instantly, so these deadlines are what stands in for
/// network latency. At most one action is in flight; navigating away from
/// the screen that started it drops it on the floor.
enum PendingAction {
    Authenticate {
        deadline: Instant,
        identity: Identity,
    },
    FetchAnalytics {
        deadline: Instant,
        team_id: String,
    },
}

impl PendingAction {
    fn deadline(&self) -> Instant {
        match self {
            PendingAction::Authenticate { deadline, .. }
            | PendingAction::FetchAnalytics { deadline, .. } => *deadline,
        }
    }
}

pub struct DevaiApp {
    settings: Settings,
    base_path: PathBuf,
    pub(super) session: SessionStore,
    pub(super) directory: AccountDirectory,
    pub(super) teams: Vec<Team>,
    screen: Screen,
    pending: Option<PendingAction>,
    seed: u64,
    pub(super) theme: ThemeConfig,
    presets: Vec<ThemeConfig>,
    pub(super) status: Option<String>,
    pub(super) login_form: LoginForm,
    pub(super) guide: GuideState,
    pub(super) student: StudentState,
}

impl DevaiApp {
    pub fn new(cc: &CreationContext<'_>, base_path: PathBuf, settings: Settings, seed: u64) -> Self {
        let app = Self::bootstrap(base_path, settings, seed);
        apply_theme(&app.theme, &cc.egui_ctx);
        app
    }

    /// Builds the full app state without touching an egui context, so the
    /// navigation logic can be exercised headless.
    pub(super) fn bootstrap(base_path: PathBuf, settings: Settings, seed: u64) -> Self {
        if let Err(err) = ensure_theme_files(&base_path) {
            log::warn!("could not write theme presets: {err}");
        }
        let presets = load_presets(&base_path);
        let theme = load_theme(&base_path, settings.ui.last_theme.as_deref());

        let mut session = SessionStore::new(&base_path);
        session.restore();
        if let Some(user) = session.current() {
            log::info!("restored session for {} ({})", user.email, user.role);
        }

        let today = Local::now().date_naive();
        let mut app = Self {
            settings,
            base_path,
            session,
            directory: AccountDirectory::with_seed_accounts(),
            teams: seeded_teams(),
            screen: Screen::Landing,
            pending: None,
            seed,
            theme,
            presets,
            status: None,
            login_form: LoginForm::default(),
            guide: GuideState::default(),
            student: StudentState::new(seed, today),
        };
        app.screen = match routes::decide(Screen::Landing, app.session.current()) {
            RouteDecision::ToHome(role) => routes::home_screen(role),
            _ => Screen::Landing,
        };
        app
    }

    /// Moves to `target` if the session allows it, otherwise to wherever
    /// the route decision points. A screen change drops any in-flight
    /// simulated request.
    pub(super) fn navigate(&mut self, target: Screen) {
        let next = match routes::decide(target, self.session.current()) {
            RouteDecision::Authorized => target,
            RouteDecision::ToLogin => Screen::Login,
            RouteDecision::ToHome(role) => routes::home_screen(role),
        };
        if next != self.screen {
            self.pending = None;
            if next == Screen::Login {
                self.login_form = LoginForm::default();
            }
            self.screen = next;
        }
    }

    pub(super) fn begin_sign_in(&mut self, identity: Identity) {
        let deadline = Instant::now() + Duration::from_millis(self.settings.latency.sign_in_ms);
        self.pending = Some(PendingAction::Authenticate { deadline, identity });
    }

    pub(super) fn begin_analytics_fetch(&mut self, team_id: String) {
        let deadline = Instant::now() + Duration::from_millis(self.settings.latency.analytics_ms);
        self.pending = Some(PendingAction::FetchAnalytics { deadline, team_id });
    }

    pub(super) fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub(super) fn authenticating(&self) -> bool {
        matches!(self.pending, Some(PendingAction::Authenticate { .. }))
    }

    pub(super) fn fetching_team(&self) -> Option<&str> {
        match &self.pending {
            Some(PendingAction::FetchAnalytics { team_id, .. }) => Some(team_id),
            _ => None,
        }
    }

    pub(super) fn sign_out(&mut self) {
        if let Err(err) = self.session.clear() {
            log::error!("sign out failed: {err}");
            self.status = Some(format!("Sign out failed: {err}"));
            return;
        }
        log::info!("signed out");
        self.guide = GuideState::default();
        self.student = StudentState::new(self.seed, Local::now().date_naive());
        self.navigate(Screen::Landing);
    }

    fn process_pending(&mut self, ctx: &Context) {
        let Some(deadline) = self.pending.as_ref().map(PendingAction::deadline) else {
            return;
        };
        let now = Instant::now();
        if now < deadline {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
            return;
        }
        match self.pending.take() {
            Some(PendingAction::Authenticate { identity, .. }) => self.finish_sign_in(identity),
            Some(PendingAction::FetchAnalytics { team_id, .. }) => {
                self.finish_analytics_fetch(&team_id)
            }
            None => {}
        }
    }

    fn finish_sign_in(&mut self, identity: Identity) {
        let role = identity.role;
        log::info!("signed in {} as {role}", identity.email);
        if let Err(err) = self.session.set_identity(identity) {
            log::warn!("session not persisted: {err}");
            self.status = Some("Signed in, but the session could not be saved to disk.".to_string());
        }
        self.login_form = LoginForm::default();
        self.navigate(routes::home_screen(role));
    }

    fn finish_analytics_fetch(&mut self, team_id: &str) {
        let Some(team) = self.teams.iter().find(|t| t.id == team_id) else {
            log::warn!("analytics requested for unknown team {team_id}");
            return;
        };
        let seed = analytics::team_seed(self.seed, team_id, self.guide.refresh_nonce);
        let today = Local::now().date_naive();
        let data = TeamAnalytics::generate(team, seed, today);
        log::debug!("generated analytics for {}", team.name);
        self.guide.analytics.insert(team_id.to_string(), data);
    }

    fn switch_theme(&mut self, name: &str) {
        let Some(preset) = self.presets.iter().find(|p| p.name == name).cloned() else {
            return;
        };
        self.theme = preset;
        self.settings.ui.last_theme = Some(name.to_string());
        if let Err(err) = save_theme(&self.base_path, &self.theme) {
            log::warn!("could not save theme: {err}");
        }
        if let Err(err) = save_settings(&self.settings, &self.base_path) {
            log::warn!("could not save settings: {err}");
        }
    }

    pub(super) fn muted_color(&self) -> Color32 {
        parse_color(&self.theme.muted_text)
    }

    pub(super) fn accent_color(&self) -> Color32 {
        parse_color(&self.theme.accent)
    }

    fn render_menu_bar(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let names: Vec<String> = self.presets.iter().map(|p| p.name.clone()).collect();
                for name in names {
                    let selected = self.theme.name == name;
                    if ui.selectable_label(selected, &name).clicked() {
                        self.switch_theme(&name);
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Account", |ui| match self.session.current().cloned() {
                Some(user) => {
                    ui.label(format!("{} ({})", user.display_name, user.role));
                    ui.label(RichText::new(&user.email).small().color(self.muted_color()));
                    ui.separator();
                    if ui.button("Sign out").clicked() {
                        self.sign_out();
                        ui.close_menu();
                    }
                }
                None => {
                    ui.label("Not signed in");
                    if ui.button("Go to sign in").clicked() {
                        self.navigate(Screen::Login);
                        ui.close_menu();
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                ui.label(format!("DevAI dashboard v{}", env!("CARGO_PKG_VERSION")));
                ui.label(format!("Data folder: {}", self.base_path.display()));
                ui.separator();
                ui.label("All analytics shown here are generated locally.");
            });
        });
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        let muted = self.muted_color();
        let status = self.status.clone();
        ui.horizontal(|ui| {
            match self.session.current() {
                Some(user) => {
                    ui.label(
                        RichText::new(format!("{} ({})", user.display_name, user.role)).small(),
                    );
                }
                None => {
                    ui.label(RichText::new("Not signed in").small().color(muted));
                }
            }
            if let Some(message) = status {
                ui.separator();
                ui.label(
                    RichText::new(message)
                        .small()
                        .color(parse_color(widgets::ACCENT_ORANGE)),
                );
                if ui.small_button("dismiss").clicked() {
                    self.status = None;
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("DevAI v{}", env!("CARGO_PKG_VERSION")))
                        .small()
                        .color(muted),
                );
            });
        });
    }

    fn render_landing(&mut self, ui: &mut egui::Ui) {
        let accent = self.accent_color();
        let muted = self.muted_color();
        ui.add_space(64.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("DevAI")
                    .strong()
                    .size(self.theme.font_size_base + 26.0)
                    .color(accent),
            );
            ui.label(
                RichText::new("Student Project Analytics")
                    .size(self.theme.font_size_base + 6.0),
            );
            ui.add_space(10.0);
            ui.label(
                RichText::new(
                    "Track your team's GitHub activity, progress and sprint health in one place.",
                )
                .color(muted),
            );
            ui.add_space(28.0);
            let get_started = egui::Button::new(RichText::new("Get Started").strong())
                .min_size(egui::vec2(170.0, 38.0));
            if ui.add(get_started).clicked() {
                self.navigate(Screen::Login);
            }
            ui.add_space(44.0);
            for (title, blurb) in LANDING_FEATURES {
                ui.label(RichText::new(title).strong());
                ui.label(RichText::new(blurb).small().color(muted));
                ui.add_space(10.0);
            }
        });
    }
}

impl App for DevaiApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        apply_theme(&self.theme, ctx);
        self.process_pending(ctx);

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ctx, ui);
        });

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        CentralPanel::default().show(ctx, |ui| match self.screen {
            Screen::Landing => self.render_landing(ui),
            Screen::Login => login::show(self, ui),
            Screen::GuideDashboard => guide::show(self, ui),
            Screen::StudentDashboard => student::show(self, ui),
        });
    }
}

pub fn launch_gui(base_path: PathBuf, settings: Settings, seed: u64) -> eframe::Result<()> {
    let (width, height) = settings.ui.window_size.unwrap_or((1180.0, 760.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DevAI - Student Project Analytics")
            .with_inner_size([width, height])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DevAI",
        native_options,
        Box::new(move |cc| Box::new(DevaiApp::new(cc, base_path, settings, seed))),
    )
}
