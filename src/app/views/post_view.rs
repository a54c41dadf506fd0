use eframe::egui;

use crate::app::state::{AppState, ImageTarget};
use crate::app::theme::colors;
use crate::app::views::{render_error, render_success};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut attach = false;
    let mut submit = false;

    ui.label(egui::RichText::new("Create a New Post").size(24.0).color(colors::TEXT_LIGHT));
    ui.add_space(12.0);

    render_error(ui, state.post_form.error());
    render_success(ui, state.post_form.success());
    render_error(ui, state.image_error.as_deref());

    ui.label(egui::RichText::new("Title").color(colors::TEXT_SECONDARY));
    ui.add(egui::TextEdit::singleline(&mut state.post_form.title).desired_width(400.0));
    ui.add_space(8.0);

    ui.label(egui::RichText::new("Description").color(colors::TEXT_SECONDARY));
    ui.add(
        egui::TextEdit::multiline(&mut state.post_form.text_content)
            .desired_rows(5)
            .desired_width(400.0),
    );
    ui.add_space(8.0);

    ui.label(egui::RichText::new("Image file").color(colors::TEXT_SECONDARY));
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut state.post_image_path).desired_width(320.0));
        if ui.button("Attach").clicked() {
            attach = true;
        }
    });
    if let Some(image) = state.post_form.image() {
        ui.label(egui::RichText::new(format!("Attached: {}", image.file_name)).color(colors::TEXT_LIGHT));
    }
    ui.add_space(12.0);

    let submitting = state.post_form.is_submitting();
    let button = egui::Button::new(egui::RichText::new("Create Post").color(colors::TEXT_LIGHT))
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

    if attach {
        let path = state.post_image_path.clone();
        state.pick_image(ImageTarget::NewPost, path);
    }
    if submit {
        state.submit_post();
    }
}
