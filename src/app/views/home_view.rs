use eframe::egui;

use crate::app::display::PostCard;
use crate::app::routes::Route;
use crate::app::state::AppState;
use crate::app::theme::colors;
use crate::app::views::{render_error, render_post_card, CardAction};
use crate::shared::models::UserRef;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut open = None;
    let mut refresh = false;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Latest Pieces").size(24.0).color(colors::TEXT_LIGHT));
        if state.home.state().is_loading() {
            ui.spinner();
        } else if ui.button("⟳").clicked() {
            refresh = true;
        }
    });
    ui.add_space(12.0);

    render_error(ui, state.home.state().error());

    let cards: Vec<(PostCard, i64)> = state
        .home
        .posts()
        .iter()
        .map(|post| (PostCard::new(post), post.owner_id))
        .collect();

    if cards.is_empty() && state.home.state().is_ready() {
        ui.label(egui::RichText::new("No posts yet.").color(colors::TEXT_SECONDARY));
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (card, owner_id) in &cards {
            if let Some(CardAction::OpenOwner(user_id)) = render_post_card(ui, card, *owner_id, false) {
                open = Some(user_id);
            }
        }
    });

    if refresh {
        state.load_home();
    }
    if let Some(user_id) = open {
        state.navigate(Route::User(UserRef::Id(user_id)));
    }
}
