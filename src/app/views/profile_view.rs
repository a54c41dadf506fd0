use eframe::egui;

use crate::app::forms::PhotoPreview;
use crate::app::state::{AppState, ImageTarget};
use crate::app::theme::colors;
use crate::app::views::{render_error, render_success};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(egui::RichText::new("Edit Profile").size(24.0).color(colors::TEXT_LIGHT));
    ui.add_space(12.0);

    let page_state = state.edit_profile.state();
    if page_state.is_loading() {
        ui.spinner();
        return;
    }
    if let Some(error) = page_state.error() {
        render_error(ui, Some(error));
        return;
    }

    render_error(ui, state.edit_profile.submit_error());
    render_success(ui, state.edit_profile.success());
    render_error(ui, state.image_error.as_deref());

    let submitting = state.edit_profile.is_submitting();
    let mut attach = false;
    let mut submit = false;
    let mut clear_toggle = None;

    let Some(form) = state.edit_profile.form_mut() else {
        return;
    };

    ui.label(egui::RichText::new("Name").color(colors::TEXT_SECONDARY));
    ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(400.0));
    ui.add_space(8.0);

    ui.label(egui::RichText::new("Bio").color(colors::TEXT_SECONDARY));
    ui.add(egui::TextEdit::multiline(&mut form.bio).desired_rows(4).desired_width(400.0));
    ui.add_space(8.0);

    ui.label(egui::RichText::new("New password (leave blank to keep)").color(colors::TEXT_SECONDARY));
    ui.add(egui::TextEdit::singleline(&mut form.new_password).password(true).desired_width(400.0));
    ui.add_space(8.0);

    ui.label(egui::RichText::new("Profile photo").color(colors::TEXT_SECONDARY));
    match form.preview() {
        PhotoPreview::Current(url) => {
            ui.hyperlink_to(egui::RichText::new("🖼 Current photo").color(colors::ACCENT), url);
        }
        PhotoPreview::Selected(name) => {
            ui.label(egui::RichText::new(format!("Selected: {name}")).color(colors::TEXT_LIGHT));
        }
        PhotoPreview::Empty => {
            ui.label(egui::RichText::new("No photo").italics().color(colors::TEXT_SECONDARY));
        }
    }

    let mut clear = form.clear_photo();
    if ui
        .checkbox(&mut clear, egui::RichText::new("Remove current photo").color(colors::TEXT_LIGHT))
        .changed()
    {
        clear_toggle = Some(clear);
    }

    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut state.profile_image_path).desired_width(320.0));
        if ui.button("Choose").clicked() {
            attach = true;
        }
    });
    ui.add_space(12.0);

    let button = egui::Button::new(egui::RichText::new("Save Changes").color(colors::TEXT_LIGHT))
        .fill(colors::ACCENT)
        .min_size(egui::vec2(140.0, 32.0));
    ui.horizontal(|ui| {
        if ui.add_enabled(!submitting, button).clicked() {
            submit = true;
        }
        if submitting {
            ui.spinner();
        }
    });

    if let Some(clear) = clear_toggle {
        state.edit_profile.set_clear_photo(clear);
    }
    if attach {
        let path = state.profile_image_path.clone();
        state.pick_image(ImageTarget::ProfilePhoto, path);
    }
    if submit {
        state.submit_profile();
    }
}
