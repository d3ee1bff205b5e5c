//! `show_card` — a single info card with a count badge.

use serde_json::json;

use crate::registry::{ToolEntry, WidgetReply};
use crate::schema::{field_i64, field_str, FieldSpec, InputSchema, ValueRecord};
use crate::widget::WidgetDescriptor;

const DESCRIPTOR: WidgetDescriptor = WidgetDescriptor {
    identifier: "show_card",
    title: "Info Card",
    description: "Render a single info card with a heading and a count badge. Use for \
        one-number summaries such as unread messages or open tasks. Arguments: title \
        (string, max 80 chars, default \"Untitled\"), count (integer 0-999, default 0), \
        accent (indigo|amber|teal, default \"indigo\"). Returns { title, count, accent }. \
        Example: show_card {\"title\": \"Inbox\", \"count\": 7}.",
    template_uri: "ui://widget/card.html",
    invoking: "Drawing the card",
    invoked: "Card ready",
};

pub fn entry() -> ToolEntry {
    ToolEntry {
        descriptor: DESCRIPTOR,
        schema: schema(),
        handler,
    }
}

fn schema() -> InputSchema {
    InputSchema::new()
        .field(
            FieldSpec::string("title", "Untitled")
                .max_len(80)
                .describe("Card heading"),
        )
        .field(
            FieldSpec::integer("count", 0)
                .bounds(0, 999)
                .describe("Number shown in the badge"),
        )
        .field(
            FieldSpec::string("accent", "indigo")
                .one_of(&["indigo", "amber", "teal"])
                .describe("Accent color of the card"),
        )
}

fn handler(record: &ValueRecord) -> Result<WidgetReply, String> {
    let title = field_str(record, "title");
    let count = field_i64(record, "count");
    let accent = field_str(record, "accent");

    Ok(WidgetReply::new(
        format!("{}: {}", title, count),
        json!({
            "title": title,
            "count": count,
            "accent": accent,
        }),
    ))
}
