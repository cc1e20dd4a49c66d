use crate::model::{Draft, ProjectStatus, RequiredField};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions the form can request.
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

/// Date picker display format.
const PICKER_FORMAT: &str = "%Y/%m/%d";

fn field_label(ui: &mut Ui, text: &str, missing: bool) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.label(
            RichText::new(text)
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        if missing {
            ui.label(RichText::new("*").size(10.0).color(theme::DANGER))
                .on_hover_text("Required");
        }
    });
}

/// Render the create/edit form bound to `draft`.
///
/// Submission is only offered once every required field is filled.
pub fn show_project_form(draft: &mut Draft, in_flight: usize, ui: &mut Ui) -> FormAction {
    let mut action = FormAction::None;
    let missing = draft.missing_fields();
    let is_missing = |f: RequiredField| missing.contains(&f);

    ui.add_space(6.0);
    ui.label(
        RichText::new(draft.heading())
            .strong()
            .size(14.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::same(10.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        egui::Grid::new("project_form_grid")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                // ── Title / Tech stack ───────────────────────────────
                ui.vertical(|ui| {
                    field_label(ui, "Project Title", is_missing(RequiredField::Title));
                    ui.add_sized(
                        [theme::FORM_FIELD_WIDTH, 24.0],
                        egui::TextEdit::singleline(&mut draft.title)
                            .text_color(theme::TEXT_PRIMARY),
                    );
                });
                ui.vertical(|ui| {
                    field_label(ui, "Technology Stack", is_missing(RequiredField::TechStack));
                    ui.add_sized(
                        [theme::FORM_FIELD_WIDTH, 24.0],
                        egui::TextEdit::singleline(&mut draft.tech_stack)
                            .text_color(theme::TEXT_PRIMARY),
                    );
                });
                ui.end_row();

                // ── Due date / Status ────────────────────────────────
                ui.vertical(|ui| {
                    field_label(ui, "Due Date", is_missing(RequiredField::DueDate));
                    ui.horizontal(|ui| match draft.due_date.as_mut() {
                        Some(date) => {
                            ui.add(
                                egui_extras::DatePickerButton::new(date)
                                    .id_salt("dp_due_date")
                                    .format(PICKER_FORMAT),
                            );
                            let clear = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::X)
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if clear.on_hover_text("Clear due date").clicked() {
                                draft.due_date = None;
                            }
                        }
                        None => {
                            let pick = ui.add(egui::Button::new(
                                RichText::new("Select a due date").color(theme::TEXT_DIM),
                            ));
                            if pick.clicked() {
                                draft.due_date = Some(chrono::Local::now().date_naive());
                            }
                        }
                    });
                });
                ui.vertical(|ui| {
                    field_label(ui, "Status", is_missing(RequiredField::Status));
                    let selected = draft
                        .status
                        .map(|s| s.label())
                        .unwrap_or("Select Status");
                    egui::ComboBox::from_id_salt("status_combo")
                        .selected_text(RichText::new(selected).size(11.5))
                        .width(theme::FORM_FIELD_WIDTH)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut draft.status, None, "Select Status");
                            for status in ProjectStatus::all() {
                                ui.selectable_value(
                                    &mut draft.status,
                                    Some(*status),
                                    status.label(),
                                );
                            }
                        });
                });
                ui.end_row();
            });

        // ── Description ──────────────────────────────────────────────
        field_label(ui, "Description", false);
        ui.add_sized(
            [theme::FORM_FIELD_WIDTH * 2.0 + 24.0, 54.0],
            egui::TextEdit::multiline(&mut draft.description)
                .text_color(theme::TEXT_SECONDARY)
                .hint_text("Optional notes about the project..."),
        );

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let ready = missing.is_empty();
            let submit = egui::Button::new(
                RichText::new(draft.submit_label()).color(Color32::WHITE),
            )
            .fill(if ready { theme::ACCENT } else { theme::BG_HEADER })
            .rounding(egui::Rounding::same(4.0));
            let resp = ui.add_enabled(ready, submit);
            let resp = if ready {
                resp
            } else {
                let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                resp.on_disabled_hover_text(format!("Required: {}", names.join(", ")))
            };
            if resp.clicked() {
                action = FormAction::Submit;
            }

            if draft.is_editing() && ui.button("Cancel").clicked() {
                action = FormAction::Cancel;
            }

            if in_flight > 0 {
                ui.spinner();
                ui.label(
                    RichText::new(format!("Saving ({in_flight})"))
                        .size(10.5)
                        .color(theme::TEXT_DIM),
                );
            }
        });
    });

    action
}
