use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::board::{Notice, ProjectBoard};
use crate::config::{AppPaths, AppSettings};
use crate::error::Result;
use crate::model::{DraftMode, Filter};
use crate::store::LocalStore;
use crate::ui;

/// Main application state.
pub struct BoardApp {
    pub board: ProjectBoard,
    pub settings: AppSettings,
    pub paths: AppPaths,
    pub store_path: PathBuf,

    // Dialog state
    pub show_about: bool,

    ctx: egui::Context,
}

impl BoardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: AppSettings,
        paths: AppPaths,
    ) -> Result<Self> {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let store_path = settings.resolved_store_path(&paths);
        let board = Self::mount_board(&cc.egui_ctx, &store_path, &settings.collection, settings.filter)?;

        Ok(Self {
            board,
            settings,
            paths,
            store_path,
            show_about: false,
            ctx: cc.egui_ctx.clone(),
        })
    }

    fn mount_board(
        ctx: &egui::Context,
        store_path: &Path,
        collection: &str,
        filter: Filter,
    ) -> Result<ProjectBoard> {
        let store = LocalStore::open(store_path)?;
        let repaint = ctx.clone();
        let mut board = ProjectBoard::mount(Arc::new(store), collection, move || {
            repaint.request_repaint()
        })?;
        board.set_filter(filter);
        Ok(board)
    }

    pub fn store_label(&self) -> String {
        format!(
            "{} · {}",
            self.store_path.display(),
            self.board.collection()
        )
    }

    // --- Store operations ---

    /// Switch to another store file. The current board keeps running if the
    /// new store can't be opened.
    pub fn open_store(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Project Store", &["json"])
            .pick_file()
        else {
            return;
        };

        match Self::mount_board(&self.ctx, &path, &self.settings.collection, self.board.filter()) {
            Ok(board) => {
                // Replacing the board drops the old one, releasing its subscription.
                self.board = board;
                self.board
                    .notify(Notice::success(format!("Opened {}", path.display())));
                self.store_path = path.clone();
                self.settings.store_path = Some(path);
                self.save_settings();
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to open store");
                self.board
                    .notify(Notice::error(format!("Error opening store: {e}")));
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.board.visible_projects().is_empty() {
            self.board
                .notify(Notice::error("Nothing to export: no projects are shown"));
            return;
        }

        let default_name = format!("{}.csv", self.board.collection());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        else {
            return;
        };

        let notice = match crate::io::export_csv(self.board.visible_projects(), &path) {
            Ok(count) => Notice::success(format!("Exported {} projects to CSV", count)),
            Err(e) => {
                tracing::error!(error = %e, "CSV export failed");
                Notice::error(format!("CSV export failed: {}", e))
            }
        };
        self.board.notify(notice);
    }

    pub fn open_data_folder(&mut self) {
        let dir = self
            .store_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.paths.data_dir.clone());
        if let Err(e) = open::that(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not open data folder");
        }
    }

    fn set_filter(&mut self, filter: Filter) {
        self.board.set_filter(filter);
        self.settings.filter = filter;
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.paths.settings) {
            tracing::warn!(path = %self.paths.settings.display(), error = %e, "could not save settings");
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        self.board.poll();

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS_BAR)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let (text, color) = match self.board.notice() {
                        Some(notice) => (
                            notice.message.as_str(),
                            ui::theme::notice_color(notice.kind),
                        ),
                        None => ("Ready", ui::theme::TEXT_SECONDARY),
                    };
                    ui.label(
                        egui::RichText::new(text)
                            .font(ui::theme::font_status())
                            .color(color),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Showing {} of {}",
                                self.board.visible_projects().len(),
                                self.board.projects().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: dashboard navigation
        let mut start_new = false;
        egui::SidePanel::left("dashboard_panel")
            .exact_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Project Dashboard").strong().size(15.0));
                    ui.add_space(10.0);
                });
                let creating = self.board.draft().mode == DraftMode::New;
                let item = egui::Button::new(
                    egui::RichText::new(format!(
                        "{}  Add New Project",
                        egui_phosphor::regular::PLUS
                    ))
                    .color(egui::Color32::WHITE),
                )
                .fill(if creating {
                    ui::theme::ACCENT
                } else {
                    ui::theme::BG_HEADER
                })
                .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([ui.available_width(), 30.0], item).clicked() {
                    start_new = true;
                }
            });
        if start_new {
            self.board.cancel_edit();
        }

        // Central panel: filter, table, form
        let mut filter_pick = None;
        let mut table_action = ui::project_table::ProjectTableAction::None;
        let mut form_action = ui::project_form::FormAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                ui.heading(egui::RichText::new("All Projects").strong());
                ui.add_space(8.0);

                filter_pick = ui::filter_bar::show_filter_bar(self.board.filter(), ui);
                ui.add_space(8.0);

                let editing = match &self.board.draft().mode {
                    DraftMode::Editing(id) => Some(id.as_str()),
                    DraftMode::New => None,
                };
                table_action = ui::project_table::show_project_table(
                    &self.board.visible_projects(),
                    editing,
                    ui,
                );

                ui.add_space(12.0);
                let in_flight = self.board.in_flight();
                form_action =
                    ui::project_form::show_project_form(self.board.draft_mut(), in_flight, ui);
            });
        });

        if let Some(filter) = filter_pick {
            self.set_filter(filter);
        }

        match table_action {
            ui::project_table::ProjectTableAction::Edit(id) => {
                if let Some(project) = self.board.project(&id).cloned() {
                    self.board.begin_edit(&project);
                }
            }
            ui::project_table::ProjectTableAction::Delete(id) => {
                self.board.delete(&id);
            }
            ui::project_table::ProjectTableAction::None => {}
        }

        match form_action {
            ui::project_form::FormAction::Submit => {
                // Failures are already reported through the board notice.
                if let Err(e) = self.board.submit() {
                    tracing::debug!(error = %e, "submit rejected");
                }
            }
            ui::project_form::FormAction::Cancel => self.board.cancel_edit(),
            ui::project_form::FormAction::None => {}
        }

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
