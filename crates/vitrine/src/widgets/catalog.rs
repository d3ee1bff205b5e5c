//! `show_catalog` — a browsable catalog of demo items.

use serde_json::json;

use crate::registry::{ToolEntry, WidgetReply};
use crate::schema::{field_i64, field_str, FieldSpec, InputSchema, ValueRecord};
use crate::widget::WidgetDescriptor;

const DESCRIPTOR: WidgetDescriptor = WidgetDescriptor {
    identifier: "show_catalog",
    title: "Item Catalog",
    description: "Render a browsable catalog of demo items. Use when the user wants to \
        see, browse, or compare what is available. Arguments: category \
        (all|tools|toys|books, default \"all\"), limit (1-12, default 6), sort \
        (name|price, default \"name\"). Returns { category, count, items: [{ name, \
        category, price }] }. Example: show_catalog {\"category\": \"books\", \"limit\": 3}.",
    template_uri: "ui://widget/catalog.html",
    invoking: "Opening the catalog",
    invoked: "Catalog ready",
};

// (name, category, price) — fixed demo dataset so the handler stays a pure
// function of its validated input.
const ITEMS: &[(&str, &str, f64)] = &[
    ("Ratchet set", "tools", 34.50),
    ("Claw hammer", "tools", 12.00),
    ("Torpedo level", "tools", 9.75),
    ("Cordless drill", "tools", 89.00),
    ("Wooden train", "toys", 24.00),
    ("Kite", "toys", 15.50),
    ("Marble run", "toys", 31.25),
    ("Plush octopus", "toys", 18.00),
    ("The Pragmatic Gardener", "books", 27.00),
    ("Maps of Nowhere", "books", 19.50),
    ("A Field Guide to Clouds", "books", 22.00),
    ("Soup for Winter", "books", 14.25),
];

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
            FieldSpec::string("category", "all")
                .one_of(&["all", "tools", "toys", "books"])
                .describe("Item category to show"),
        )
        .field(
            FieldSpec::integer("limit", 6)
                .bounds(1, 12)
                .describe("Maximum number of items to return"),
        )
        .field(
            FieldSpec::string("sort", "name")
                .one_of(&["name", "price"])
                .describe("Sort order for the items"),
        )
}

fn handler(record: &ValueRecord) -> Result<WidgetReply, String> {
    let category = field_str(record, "category");
    let limit = field_i64(record, "limit") as usize;
    let sort = field_str(record, "sort");

    let mut items: Vec<&(&str, &str, f64)> = ITEMS
        .iter()
        .filter(|(_, cat, _)| category == "all" || *cat == category)
        .collect();
    match sort {
        "price" => items.sort_by(|a, b| a.2.total_cmp(&b.2)),
        _ => items.sort_by_key(|(name, _, _)| *name),
    }
    items.truncate(limit);

    let structured = json!({
        "category": category,
        "count": items.len(),
        "items": items
            .iter()
            .map(|(name, cat, price)| json!({
                "name": name,
                "category": cat,
                "price": price,
            }))
            .collect::<Vec<_>>(),
    });

    Ok(WidgetReply::new(
        format!(
            "Showing {} item(s) from the '{}' category, sorted by {}",
            items.len(),
            category,
            sort
        ),
        structured,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn run(args: Value) -> WidgetReply {
        let args: Map<String, Value> = args.as_object().unwrap().clone();
        let record = schema().validate(&args).unwrap();
        handler(&record).unwrap()
    }

    #[test]
    fn test_defaults_show_six_items() {
        let reply = run(json!({}));
        assert_eq!(reply.structured["category"], "all");
        assert_eq!(reply.structured["count"], 6);
        assert_eq!(reply.structured["items"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_category_filter() {
        let reply = run(json!({"category": "books", "limit": 12}));
        let items = reply.structured["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i["category"] == "books"));
    }

    #[test]
    fn test_sort_by_price_is_ascending() {
        let reply = run(json!({"sort": "price", "limit": 12}));
        let prices: Vec<f64> = reply.structured["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["price"].as_f64().unwrap())
            .collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_by_name_is_alphabetical() {
        let reply = run(json!({"limit": 12}));
        let names: Vec<&str> = reply.structured["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_deterministic_output() {
        let a = run(json!({"category": "toys"}));
        let b = run(json!({"category": "toys"}));
        assert_eq!(a.structured, b.structured);
        assert_eq!(a.summary, b.summary);
    }
}
