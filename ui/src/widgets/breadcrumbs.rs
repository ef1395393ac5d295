use egui::Ui;
use gove_business::{Route, navigate};
use gove_states::StateCtx;

/// Trail of the current page. Earlier crumbs are links.
pub fn breadcrumbs(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let crumbs = state_ctx.state::<Route>().breadcrumbs();
    let mut target = None;

    ui.horizontal(|ui| {
        for (index, (label, route)) in crumbs.into_iter().enumerate() {
            if index > 0 {
                ui.weak("/");
            }
            match route {
                Some(route) => {
                    if ui.link(label).clicked() {
                        target = Some(route);
                    }
                }
                None => {
                    ui.label(label);
                }
            }
        }
    });

    if let Some(route) = target {
        navigate(state_ctx, route);
    }
}
