use crate::gui::app::DevaiApp;
use crate::gui::widgets;
use crate::session::Role;
use eframe::egui::{self, RichText, TextEdit, Ui};

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub registering: bool,
    pub chosen_role: Role,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            registering: false,
            chosen_role: Role::Student,
        }
    }
}

pub(super) fn show(app: &mut DevaiApp, ui: &mut Ui) {
    let muted = app.muted_color();
    let accent = app.accent_color();
    let authenticating = app.authenticating();
    let base_size = app.theme.font_size_base;

    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("DevAI")
                .strong()
                .size(base_size + 16.0)
                .color(accent),
        );
        ui.label(RichText::new("Sign in to your dashboard").color(muted));
        ui.add_space(18.0);

        let card_width = 380.0;
        ui.set_max_width(card_width);
        widgets::card_frame(&app.theme).show(ui, |ui| {
            ui.set_width(card_width - 28.0);
            let heading = if app.login_form.registering {
                "Create your account"
            } else {
                "Welcome back"
            };
            ui.label(RichText::new(heading).strong().size(base_size + 4.0));
            ui.add_space(10.0);

            ui.label(RichText::new("Email").small().color(muted));
            ui.add(
                TextEdit::singleline(&mut app.login_form.email)
                    .hint_text("you@university.edu")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(6.0);
            ui.label(RichText::new("Password").small().color(muted));
            ui.add(
                TextEdit::singleline(&mut app.login_form.password)
                    .password(true)
                    .hint_text("anything works in the mock")
                    .desired_width(f32::INFINITY),
            );

            if app.login_form.registering {
                ui.add_space(8.0);
                ui.label(RichText::new("I am a").small().color(muted));
                ui.horizontal(|ui| {
                    for role in [Role::Student, Role::Guide] {
                        let selected = app.login_form.chosen_role == role;
                        if ui.selectable_label(selected, role.as_str()).clicked() {
                            app.login_form.chosen_role = role;
                        }
                    }
                });
            }

            ui.add_space(12.0);
            if authenticating {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Signing you in...").color(muted));
                });
            } else {
                let can_submit = !app.login_form.email.trim().is_empty();
                let label = if app.login_form.registering {
                    "Create Account"
                } else {
                    "Sign In"
                };
                let button = egui::Button::new(RichText::new(label).strong())
                    .min_size(egui::vec2(ui.available_width(), 34.0));
                let submitted = ui.add_enabled(can_submit, button).clicked()
                    || (can_submit && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                if submitted {
                    submit(app);
                }
            }

            ui.add_space(8.0);
            let toggle = if app.login_form.registering {
                "Already have an account? Sign in"
            } else {
                "Need an account? Create one"
            };
            if ui.link(toggle).clicked() {
                app.login_form.registering = !app.login_form.registering;
            }
        });

        ui.add_space(14.0);
        ui.label(
            RichText::new(
                "Emails starting with \"guide\" or containing \"professor\" or \
                 \"teacher\" get the guide dashboard.",
            )
            .small()
            .color(muted),
        );
    });
}

fn submit(app: &mut DevaiApp) {
    let email = app.login_form.email.trim().to_string();
    if email.is_empty() {
        return;
    }
    let account = if app.login_form.registering {
        app.directory.register(&email, app.login_form.chosen_role)
    } else {
        app.directory.login(&email)
    };
    log::debug!("authentication requested for {email}");
    app.begin_sign_in(account.to_identity());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_form_defaults_to_signing_in_as_student() {
        let form = LoginForm::default();
        assert!(!form.registering);
        assert_eq!(form.chosen_role, Role::Student);
        assert!(form.email.is_empty());
    }
}
