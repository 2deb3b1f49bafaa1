use eframe::egui::{self, RichText, ScrollArea};

use crate::state::{AppState, Tab};
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// A session either has its dataset or stopped at the load error.
pub enum Session {
    Ready(Box<AppState>),
    Failed(String),
}

pub struct DashboardApp {
    pub session: Session,
}

impl DashboardApp {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.session {
            Session::Ready(state) => state,
            Session::Failed(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.heading(RichText::new(format!("❌ {message}")).color(egui::Color32::RED));
                    });
                });
                return;
            }
        };

        ctx.set_visuals(state.theme.visuals());

        // ---- Left side panel: theme + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(state.theme.sidebar))
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Bottom: footer note ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui, &state.theme);
        });

        // ---- Central panel: header, metrics, tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::header(ui, state);
                    panels::metric_cards(ui, state);
                    ui.add_space(10.0);
                    panels::tab_bar(ui, state);
                    match state.tab {
                        Tab::Charts => charts::charts_tab(ui, state),
                        Tab::Data => table::data_tab(ui, state),
                    }
                });
        });
    }
}
