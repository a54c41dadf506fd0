use eframe::egui;

use crate::app::display::{PostCard, NO_IMAGE_LABEL};
use crate::app::routes::Route;
use crate::app::state::AppState;
use crate::app::theme::{colors, styles};
use crate::shared::models::{PostId, UserId, UserRef};

pub mod auth_view;
pub mod home_view;
pub mod post_view;
pub mod profile_view;
pub mod user_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            let mut target = None;

            ui.horizontal(|ui| {
                if ui
                    .add(egui::Label::new(
                        egui::RichText::new("🏺 Glaze").size(18.0).strong().color(colors::TEXT_LIGHT),
                    ).sense(egui::Sense::click()))
                    .clicked()
                {
                    target = Some(Route::Home);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let session = state.session();
                    if session.is_loading() {
                        ui.spinner();
                    } else if session.is_authenticated() {
                        let label = session
                            .user()
                            .map(|user| user.name.clone().filter(|n| !n.is_empty()).unwrap_or_else(|| user.email.clone()))
                            .unwrap_or_default();
                        if ui.button("Logout").clicked() {
                            state.logout();
                            return;
                        }
                        if ui.button("Edit Profile").clicked() {
                            target = Some(Route::EditProfile);
                        }
                        if ui.button("My Profile").clicked() {
                            target = Some(Route::User(UserRef::Me));
                        }
                        if ui.button("Create Post").clicked() {
                            target = Some(Route::CreatePost);
                        }
                        ui.colored_label(colors::TEXT_LIGHT, label);
                    } else {
                        if ui.button("Register").clicked() {
                            target = Some(Route::Register);
                        }
                        if ui.button("Login").clicked() {
                            target = Some(Route::Login);
                        }
                    }
                });
            });

            if let Some(route) = target {
                state.navigate(route);
            }
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| {
            if state.pending_route().is_some() {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                    ui.spinner();
                });
                return;
            }

            match state.route() {
                Route::Home => home_view::render(ui, state),
                Route::Login => auth_view::render_login(ui, state),
                Route::Register => auth_view::render_register(ui, state),
                Route::CreatePost => post_view::render(ui, state),
                Route::User(_) => user_view::render(ui, state),
                Route::EditProfile => profile_view::render(ui, state),
            }
        });
}

/// Something the user clicked on a post card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    OpenOwner(UserId),
    Delete(PostId),
    ToggleShowcase(PostId),
}

/// Render one post card. Owner controls (delete, showcase) are only drawn
/// when `owner_controls` is set.
pub fn render_post_card(
    ui: &mut egui::Ui,
    card: &PostCard,
    owner_id: UserId,
    owner_controls: bool,
) -> Option<CardAction> {
    let mut action = None;

    styles::card_frame(card.is_showcased).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&card.title).size(18.0).strong().color(colors::TEXT_DARK));

        match &card.image_url {
            Some(url) => {
                ui.hyperlink_to(egui::RichText::new("🖼 View image").color(colors::ACCENT), url);
            }
            None => {
                ui.label(egui::RichText::new(NO_IMAGE_LABEL).italics().color(colors::TEXT_SECONDARY));
            }
        }

        if let Some(snippet) = &card.snippet {
            ui.label(egui::RichText::new(snippet).color(colors::TEXT_DARK));
        }

        ui.horizontal(|ui| {
            if ui
                .link(egui::RichText::new(format!("by {}", card.owner_label)).color(colors::TEXT_SECONDARY))
                .clicked()
            {
                action = Some(CardAction::OpenOwner(owner_id));
            }
            ui.label(egui::RichText::new(format!("♥ {}", card.like_count)).color(colors::TEXT_SECONDARY));

            if owner_controls {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = egui::Button::new(egui::RichText::new("Delete").color(colors::TEXT_LIGHT))
                        .fill(colors::BUTTON_DANGER);
                    if ui.add(delete).clicked() {
                        action = Some(CardAction::Delete(card.id));
                    }
                    let showcase = egui::Button::new(
                        egui::RichText::new(card.showcase_label()).color(colors::TEXT_LIGHT),
                    )
                    .fill(colors::BUTTON_PRIMARY);
                    if ui.add(showcase).clicked() {
                        action = Some(CardAction::ToggleShowcase(card.id));
                    }
                });
            }
        });
    });
    ui.add_space(8.0);

    action
}

/// One line of error text, if any.
pub fn render_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.label(egui::RichText::new(error).color(colors::ERROR));
        ui.add_space(8.0);
    }
}

pub fn render_success(ui: &mut egui::Ui, message: Option<&str>) {
    if let Some(message) = message {
        ui.label(egui::RichText::new(message).color(colors::SUCCESS));
        ui.add_space(8.0);
    }
}
