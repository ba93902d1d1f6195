//! `panels` subcommand: list the canonical detail panels and their fields

use colored::Colorize;
use meridian_core::PanelKind;
use meridian_panel::{DetailPanel, FieldConfigManager};
use meridian_style::SymbolizerKind;

/// Print every symbolizer kind with its detail panels and field sets
pub fn panels() -> anyhow::Result<()> {
    let kinds = [
        SymbolizerKind::Point,
        SymbolizerKind::Line,
        SymbolizerKind::Polygon,
        SymbolizerKind::Text,
        SymbolizerKind::Raster,
    ];

    for kind in kinds {
        println!("{}", kind.to_string().bold());
        for panel_kind in kind.detail_panels() {
            print_panel(*panel_kind);
        }
        println!();
    }
    Ok(())
}

fn print_panel(kind: PanelKind) {
    let mut manager = FieldConfigManager::new();
    let panel = DetailPanel::build(kind, &mut manager);
    println!("  {}", panel.label.cyan());
    for field in manager.panel_fields(kind) {
        let mut notes = Vec::new();
        if field.base().is_value_only() {
            notes.push("value-only");
        }
        if !field.is_enabled() {
            notes.push("disabled");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };
        println!(
            "    {:<18} {:<8} {}{}",
            field.field().to_string(),
            field.value_type().to_string(),
            field.base().label(),
            notes.dimmed()
        );
    }
}
