//! Configuration schema command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use qrnode_types::config::{AttributeKind, QR_CODE_ATTRIBUTES};

/// Print the declared node attributes in presentation order.
pub fn show_schema(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&QR_CODE_ATTRIBUTES)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Order").fg(Color::White),
        Cell::new("Attribute").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Required").fg(Color::White),
    ]);

    for attr in &QR_CODE_ATTRIBUTES {
        let required = if attr.required {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("no")
        };
        table.add_row(vec![
            Cell::new(attr.order),
            Cell::new(attr.name).fg(Color::Cyan),
            Cell::new(kind_label(&attr.kind)),
            required,
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

fn kind_label(kind: &AttributeKind) -> String {
    match kind {
        AttributeKind::Choice(choices) => format!("one of {}", choices.join(" | ")),
        AttributeKind::Text => "text".to_string(),
        AttributeKind::OrderedMap => "ordered name/value list".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_label() {
        assert_eq!(
            kind_label(&AttributeKind::Choice(&["FreeText", "URI"])),
            "one of FreeText | URI"
        );
        assert_eq!(kind_label(&AttributeKind::Text), "text");
    }
}
