//! Item cards.

use crate::summary::ItemSummary;

/// Render the item as an HTML fragment.
pub fn render_card(summary: &ItemSummary) -> String {
    let mut out = format!(
        "<span style='font-size:1.5em; font-weight:bold;'>Item Name: {}</span><br>",
        escape_html(&summary.name)
    );
    out.push_str("<hr>");
    if summary.cursed {
        out.push_str("<span style='font-size:1.2em;'> Cursed Item</span><br>");
        out.push_str("<br>");
    }
    out.push_str("<span style='font-size:1.2em; font-weight:bold;'>Effects:</span><br>");
    if !summary.effects.is_empty() {
        out.push_str("<ul>");
        for line in &summary.effects {
            out.push_str(&format!(
                "<li style='font-size:1em;'>{}: {}</li>",
                line.part,
                escape_html(&line.effect)
            ));
        }
        out.push_str("</ul>");
    }
    out.push_str("<hr>");
    out.push_str(&format!(
        "<span style='font-size:1.1em;'>XP: {}</span><br>",
        summary.xp
    ));
    out.push_str(&format!(
        "<span style='font-size:1.1em;'>GP: {}</span><br>",
        summary.gp
    ));
    out
}

/// Render the item as plain text for a terminal.
pub fn render_text(summary: &ItemSummary) -> String {
    let name = if summary.is_empty() {
        "(nothing)"
    } else {
        summary.name.as_str()
    };
    let mut out = format!("Item Name: {name}\n");
    if summary.cursed {
        out.push_str("Cursed Item\n");
    }
    out.push_str("Effects:\n");
    if summary.effects.is_empty() {
        out.push_str("  (none)\n");
    }
    for line in &summary.effects {
        out.push_str(&format!("  - {}: {}\n", line.part, line.effect));
    }
    out.push_str(&format!("XP: {}\nGP: {}", summary.xp, summary.gp));
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
