use crate::model::Filter;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Render the three mutually exclusive filter buttons. Returns the newly
/// picked filter, if the user changed it.
pub fn show_filter_bar(current: Filter, ui: &mut Ui) -> Option<Filter> {
    let mut picked = None;
    ui.horizontal(|ui| {
        for filter in Filter::all() {
            let selected = *filter == current;
            let btn = egui::Button::new(RichText::new(filter.label()).size(12.0).color(
                if selected {
                    Color32::WHITE
                } else {
                    theme::TEXT_SECONDARY
                },
            ))
            .fill(if selected { theme::ACCENT } else { theme::BG_HEADER })
            .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([84.0, 26.0], btn).clicked() && !selected {
                picked = Some(*filter);
            }
        }
    });
    picked
}
