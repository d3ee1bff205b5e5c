//! `show_countdown` — a countdown timer widget.

use serde_json::json;

use crate::registry::{ToolEntry, WidgetReply};
use crate::schema::{field_i64, field_str, FieldSpec, InputSchema, ValueRecord};
use crate::widget::WidgetDescriptor;

const DESCRIPTOR: WidgetDescriptor = WidgetDescriptor {
    identifier: "show_countdown",
    title: "Countdown",
    description: "Render a countdown timer. Use when the user wants a visible timer \
        toward an event or deadline. Arguments: label (string, max 40 chars, default \
        \"Launch\"), seconds (integer 0-86400, default 60). Returns { label, seconds, \
        formatted } where formatted is HH:MM:SS. Example: \
        show_countdown {\"label\": \"Tea\", \"seconds\": 180}.",
    template_uri: "ui://widget/countdown.html",
    invoking: "Winding the timer",
    invoked: "Timer set",
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
            FieldSpec::string("label", "Launch")
                .max_len(40)
                .describe("Label shown above the timer"),
        )
        .field(
            FieldSpec::integer("seconds", 60)
                .bounds(0, 86_400)
                .describe("Duration in seconds (up to 24 hours)"),
        )
}

fn handler(record: &ValueRecord) -> Result<WidgetReply, String> {
    let label = field_str(record, "label");
    let seconds = field_i64(record, "seconds");
    let formatted = format_hms(seconds);

    Ok(WidgetReply::new(
        format!("Countdown '{}' set for {}", label, formatted),
        json!({
            "label": label,
            "seconds": seconds,
            "formatted": formatted,
        }),
    ))
}

/// Render a non-negative duration as HH:MM:SS.
fn format_hms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
