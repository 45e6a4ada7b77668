use serde::Serialize;
use serde_json::Value;

use desk_core::errors::DeskError;
use desk_core::responses::Envelope;

use crate::cli::OutputFormat;
use crate::commands::Reply;

pub mod table;

/// Wrap a command outcome in the response envelope.
pub fn envelope(outcome: Result<Reply, DeskError>) -> Envelope<Value> {
    match outcome {
        Ok(reply) => Envelope::success(reply.data, reply.status),
        Err(error) => Envelope::failure(&error),
    }
}

/// Render an envelope in the requested format.
///
/// `table` prints only the payload of a success, or a one-line error.
pub fn render<T: Serialize>(envelope: &Envelope<T>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(envelope)?),
        OutputFormat::Raw => Ok(serde_json::to_string(envelope)?),
        OutputFormat::Table => match (&envelope.data, &envelope.error) {
            (Some(data), _) if envelope.ok => render_table(data),
            (_, Some(error)) => Ok(format!("error ({}): {error}", envelope.status)),
            _ => Ok(String::from("(no data)")),
        },
    }
}

/// Print an envelope in the requested format.
pub fn output<T: Serialize>(envelope: &Envelope<T>, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(envelope, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows))
        }
        scalar => Ok(table::render_entity_table(&["value"], &[vec![value_to_cell(&scalar)]])),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    // Columns come from the first object row.
    let headers = items
        .iter()
        .find_map(Value::as_object)
        .map(|first| first.keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows);
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
