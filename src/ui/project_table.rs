use crate::model::Project;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions that the project table can request.
pub enum ProjectTableAction {
    None,
    Edit(String),
    Delete(String),
}

const COL_TITLE: f32 = 200.0;
const COL_STACK: f32 = 150.0;
const COL_STATUS: f32 = 100.0;
const COL_DUE: f32 = 90.0;

fn cell(ui: &mut Ui, width: f32, text: RichText) {
    ui.allocate_ui(egui::vec2(width, 18.0), |ui| {
        ui.set_width(width);
        ui.add(egui::Label::new(text).truncate());
    });
}

/// Render the project list. `editing` highlights the row loaded in the form.
pub fn show_project_table(
    projects: &[&Project],
    editing: Option<&str>,
    ui: &mut Ui,
) -> ProjectTableAction {
    let mut action = ProjectTableAction::None;

    // Column headers
    egui::Frame::default()
        .fill(theme::BG_HEADER)
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(8.0, 5.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;
                let hdr = |text: &str| {
                    RichText::new(text)
                        .font(theme::font_header())
                        .color(theme::TEXT_DIM)
                        .strong()
                };
                cell(ui, COL_TITLE, hdr("PROJECT TITLE"));
                cell(ui, COL_STACK, hdr("TECH STACK"));
                cell(ui, COL_STATUS, hdr("STATUS"));
                cell(ui, COL_DUE, hdr("DUE DATE"));
                ui.label(hdr("ACTION"));
            });
        });

    ui.add_space(2.0);

    if projects.is_empty() {
        ui.add_space(8.0);
        ui.label(
            RichText::new("No projects to show")
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(8.0);
        return action;
    }

    egui::ScrollArea::vertical()
        .id_salt("project_rows")
        .max_height(320.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (i, project) in projects.iter().enumerate() {
                let is_editing = editing == Some(project.id.as_str());

                let row_bg = if is_editing {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(8.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        cell(
                            ui,
                            COL_TITLE,
                            RichText::new(&project.title).size(12.0).color(if is_editing {
                                Color32::WHITE
                            } else {
                                theme::TEXT_PRIMARY
                            }),
                        );
                        cell(
                            ui,
                            COL_STACK,
                            RichText::new(&project.tech_stack)
                                .size(11.5)
                                .color(theme::TEXT_SECONDARY),
                        );
                        cell(
                            ui,
                            COL_STATUS,
                            RichText::new(&project.status)
                                .size(11.5)
                                .color(theme::status_color(project.status_value())),
                        );
                        cell(
                            ui,
                            COL_DUE,
                            RichText::new(project.due_date_display())
                                .size(11.5)
                                .color(theme::TEXT_SECONDARY),
                        );

                        let edit_btn = ui.add(
                            egui::Button::new(
                                RichText::new(egui_phosphor::regular::PENCIL_SIMPLE)
                                    .size(13.0)
                                    .color(theme::WARNING),
                            )
                            .frame(false),
                        );
                        if edit_btn.on_hover_text("Edit project").clicked() {
                            action = ProjectTableAction::Edit(project.id.clone());
                        }

                        let del_btn = ui.add(
                            egui::Button::new(
                                RichText::new(egui_phosphor::regular::TRASH)
                                    .size(13.0)
                                    .color(theme::DANGER),
                            )
                            .frame(false),
                        );
                        if del_btn.on_hover_text("Delete project").clicked() {
                            action = ProjectTableAction::Delete(project.id.clone());
                        }
                    });
                });

                ui.add_space(1.0);
            }
        });

    action
}
