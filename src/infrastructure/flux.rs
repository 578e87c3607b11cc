// Flux query building
use crate::domain::telemetry::TimeWindow;

/// Rows of one field in the window, sorted by time
pub fn field_query(bucket: &str, measurement: &str, field: &str, window: TimeWindow) -> String {
    format!(
        "from(bucket: {bucket})\n  \
         |> range(start: -{minutes}m)\n  \
         |> filter(fn: (r) => r[\"_measurement\"] == {measurement} and r[\"_field\"] == {field})\n  \
         |> sort(columns: [\"_time\"])",
        bucket = string_literal(bucket),
        minutes = window.range_minutes,
        measurement = string_literal(measurement),
        field = string_literal(field),
    )
}

/// Three fields pivoted into columns keyed by `_time`
pub fn pivot_query(bucket: &str, measurement: &str, fields: &[String; 3], window: TimeWindow) -> String {
    let field_filter = fields
        .iter()
        .map(|f| format!("r[\"_field\"] == {}", string_literal(f)))
        .collect::<Vec<_>>()
        .join(" or ");
    let complete = fields
        .iter()
        .map(|f| format!("exists r[{}]", string_literal(f)))
        .collect::<Vec<_>>()
        .join(" and ");

    format!(
        "from(bucket: {bucket})\n  \
         |> range(start: -{minutes}m)\n  \
         |> filter(fn: (r) => r[\"_measurement\"] == {measurement})\n  \
         |> filter(fn: (r) => {field_filter})\n  \
         |> pivot(rowKey: [\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")\n  \
         |> filter(fn: (r) => {complete})\n  \
         |> sort(columns: [\"_time\"])",
        bucket = string_literal(bucket),
        minutes = window.range_minutes,
        measurement = string_literal(measurement),
    )
}

/// Quote a value as a Flux string literal
fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                literal.push('\\');
                literal.push(c);
            }
            '$' => literal.push_str("\\$"),
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}
