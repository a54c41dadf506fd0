use eframe::egui;

use crate::app::routes::Route;
use crate::app::state::AppState;
use crate::app::theme::colors;
use crate::app::views::{render_error, render_success};

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 110.0;

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool) {
    ui.horizontal(|ui| {
        let indent = (ui.available_width() - INPUT_WIDTH - LABEL_WIDTH - 20.0).max(0.0) / 2.0;
        ui.add_space(indent);
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value).password(password),
        );
    });
    ui.add_space(8.0);
}

fn heading(ui: &mut egui::Ui, title: &str) {
    ui.add_space(60.0);
    ui.label(egui::RichText::new(title).size(24.0).color(colors::TEXT_LIGHT));
    ui.add_space(20.0);
}

pub fn render_login(ui: &mut egui::Ui, state: &mut AppState) {
    let mut go_register = false;

    ui.vertical_centered(|ui| {
        heading(ui, "Login");
        render_error(ui, state.login_form.error());

        field(ui, "Email:", &mut state.login_form.email, false);
        field(ui, "Password:", &mut state.login_form.password, true);
        ui.add_space(12.0);

        let submitting = state.login_form.is_submitting();
        let button = egui::Button::new(egui::RichText::new("Login").color(colors::TEXT_LIGHT))
            .fill(colors::ACCENT)
            .min_size(egui::vec2(120.0, 32.0));
        if ui.add_enabled(!submitting, button).clicked() {
            state.submit_login();
        }

        if submitting {
            ui.add_space(15.0);
            ui.spinner();
        }

        ui.add_space(10.0);
        if ui.link("Don't have an account? Register").clicked() {
            go_register = true;
        }
    });

    if go_register {
        state.navigate(Route::Register);
    }
}

pub fn render_register(ui: &mut egui::Ui, state: &mut AppState) {
    let mut go_login = false;

    ui.vertical_centered(|ui| {
        heading(ui, "Register");
        render_error(ui, state.register_form.error());
        render_success(ui, state.register_form.success());

        field(ui, "Email:", &mut state.register_form.email, false);
        field(ui, "Password:", &mut state.register_form.password, true);
        field(ui, "Confirm:", &mut state.register_form.confirm_password, true);
        ui.add_space(12.0);

        let submitting = state.register_form.is_submitting();
        let button = egui::Button::new(egui::RichText::new("Sign Up").color(colors::TEXT_LIGHT))
            .fill(colors::ACCENT)
            .min_size(egui::vec2(120.0, 32.0));
        if ui.add_enabled(!submitting, button).clicked() {
            state.submit_register();
        }

        if submitting {
            ui.add_space(15.0);
            ui.spinner();
        }

        ui.add_space(10.0);
        if ui.link("Already registered? Log in").clicked() {
            go_login = true;
        }
    });

    if go_login {
        state.navigate(Route::Login);
    }
}
