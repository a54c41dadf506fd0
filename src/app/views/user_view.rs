use eframe::egui;

use crate::app::display::{PhotoSource, PostCard, ProfileCard};
use crate::app::routes::Route;
use crate::app::state::AppState;
use crate::app::theme::{colors, styles};
use crate::app::views::{render_error, render_post_card, CardAction};
use crate::shared::models::UserRef;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(page) = state.user_page.as_ref() else {
        return;
    };

    if page.state().is_loading() && page.state().data().is_none() {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.spinner();
        });
        return;
    }

    let Some(data) = page.state().data() else {
        render_error(ui, page.state().error());
        return;
    };

    let owner_controls = page.is_own_profile();
    let profile = ProfileCard::new(&data.profile);
    let showcased: Vec<(PostCard, i64)> = page
        .showcased_posts()
        .iter()
        .map(|post| (PostCard::new(post), post.owner_id))
        .collect();
    let others: Vec<(PostCard, i64)> = page
        .visible_posts()
        .into_iter()
        .map(|post| (PostCard::new(post), post.owner_id))
        .collect();
    let pending_delete = page.pending_delete();
    let page_error = page.state().error().map(str::to_string);
    let action_error = page.action_error().map(str::to_string);

    let mut action = None;
    let mut edit = false;

    egui::ScrollArea::vertical().show(ui, |ui| {
        styles::card_frame(false).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&profile.name).size(24.0).strong().color(colors::TEXT_DARK));
            match &profile.photo {
                PhotoSource::Remote(url) => {
                    ui.hyperlink_to(egui::RichText::new("🖼 Profile photo").color(colors::ACCENT), url);
                }
                PhotoSource::Placeholder => {
                    ui.label(egui::RichText::new("No profile photo").italics().color(colors::TEXT_SECONDARY));
                }
            }
            ui.label(egui::RichText::new(&profile.bio).color(colors::TEXT_DARK));
            if owner_controls && ui.button("Edit Profile").clicked() {
                edit = true;
            }
        });
        ui.add_space(12.0);

        render_error(ui, page_error.as_deref());
        render_error(ui, action_error.as_deref());

        if !showcased.is_empty() {
            ui.label(egui::RichText::new("Showcased").size(20.0).color(colors::TEXT_LIGHT));
            ui.add_space(6.0);
            for (card, owner_id) in &showcased {
                if let Some(clicked) = render_post_card(ui, card, *owner_id, owner_controls) {
                    action = Some(clicked);
                }
            }
            ui.add_space(12.0);
        }

        ui.label(egui::RichText::new("All Posts").size(20.0).color(colors::TEXT_LIGHT));
        ui.add_space(6.0);
        if others.is_empty() {
            ui.label(egui::RichText::new("No other posts.").color(colors::TEXT_SECONDARY));
        }
        for (card, owner_id) in &others {
            if let Some(clicked) = render_post_card(ui, card, *owner_id, owner_controls) {
                action = Some(clicked);
            }
        }
    });

    if let Some(post_id) = pending_delete {
        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("Delete post?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(styles::modal_frame())
            .show(ui.ctx(), |ui| {
                ui.label(
                    egui::RichText::new(format!("Are you sure you want to delete post {post_id}?"))
                        .color(colors::TEXT_DARK),
                );
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    let delete = egui::Button::new(egui::RichText::new("Delete").color(colors::TEXT_LIGHT))
                        .fill(colors::BUTTON_DANGER);
                    if ui.add(delete).clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if confirm {
            state.confirm_delete();
        } else if cancel {
            if let Some(page) = state.user_page.as_mut() {
                page.cancel_delete();
            }
        }
    }

    match action {
        Some(CardAction::OpenOwner(user_id)) => state.navigate(Route::User(UserRef::Id(user_id))),
        Some(CardAction::Delete(post_id)) => {
            if let Some(page) = state.user_page.as_mut() {
                page.request_delete(post_id);
            }
        }
        Some(CardAction::ToggleShowcase(post_id)) => state.toggle_showcase(post_id),
        None => {}
    }
    if edit {
        state.navigate(Route::EditProfile);
    }
}
