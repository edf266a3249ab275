use crate::services::event_service::parse_event_date;
use crate::session::ChartSession;
use crate::utils::{OutputArea, Table};

const USAGE: &str = "Usage: `$event add <YYYY-MM-DD> [--color #RRGGBB] [--image URL] <description>`, `$event preset [SYMBOL]` or `$event clear`";

/// Parsed form of `$event add ...`
#[derive(Debug, Default, PartialEq)]
struct EventArgs {
    date: Option<String>,
    color: Option<String>,
    image_url: Option<String>,
    description: String,
}

/// Whitespace-separated words of `text` with their byte offsets
fn words_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}

/// Parse `<date> [--color C] [--image URL] <description>`.
///
/// Description words keep the spacing they had in `raw`; a flag between two
/// words is replaced by a single space.
fn parse_add_args(raw: &str) -> Result<EventArgs, String> {
    let mut parsed = EventArgs::default();
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut in_run = false;
    let mut iter = words_with_offsets(raw).into_iter();

    while let Some((offset, word)) = iter.next() {
        match word {
            "--color" | "-c" => {
                let (_, value) = iter.next().ok_or("`--color` needs a value like #FF9800")?;
                parsed.color = Some(value.to_string());
                in_run = false;
            }
            "--image" | "-i" => {
                let (_, value) = iter.next().ok_or("`--image` needs a URL")?;
                parsed.image_url = Some(value.to_string());
                in_run = false;
            }
            _ if parsed.date.is_none() && runs.is_empty() => parsed.date = Some(word.to_string()),
            _ => {
                let end = offset + word.len();
                match runs.last_mut() {
                    Some(run) if in_run => run.1 = end,
                    _ => runs.push((offset, end)),
                }
                in_run = true;
            }
        }
    }

    parsed.description = runs
        .iter()
        .map(|&(start, end)| &raw[start..end])
        .collect::<Vec<_>>()
        .join(" ");
    Ok(parsed)
}

/// Redraw after an event change, replacing whatever the output area showed
async fn redraw_if_loaded(session: &ChartSession, out: &mut OutputArea) -> Result<(), String> {
    session.redraw(out).await.map(|_| ()).map_err(|e| e.to_string())
}

/// `$event <add|preset|clear> ...`, given the raw text after the command
pub async fn execute(session: &mut ChartSession, out: &mut OutputArea, raw: &str) -> Result<(), String> {
    let raw = raw.trim();
    let (action, rest) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
    if action.is_empty() {
        return Err(USAGE.to_string());
    }

    match action.to_lowercase().as_str() {
        "add" => execute_add(session, out, rest).await,
        "preset" | "presets" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            execute_preset(session, out, &args).await
        }
        "clear" => execute_clear(session, out).await,
        _ => Err(USAGE.to_string()),
    }
}

async fn execute_add(session: &mut ChartSession, out: &mut OutputArea, raw: &str) -> Result<(), String> {
    let parsed = parse_add_args(raw)?;
    let date = parsed
        .date
        .as_deref()
        .map(parse_event_date)
        .transpose()
        .map_err(|e| e.to_string())?;

    let event = session
        .add_event(date, &parsed.description, parsed.color.as_deref(), parsed.image_url.as_deref())
        .map_err(|e| e.to_string())?;
    let message = format!("Added event: {} on {}", event.description, event.date.format("%Y-%m-%d"));

    if session.has_data() {
        out.clear();
    }
    out.print(message);
    redraw_if_loaded(session, out).await
}

async fn execute_preset(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    let symbol = match args.first() {
        Some(symbol) => symbol.to_uppercase(),
        None => session.config().symbol.clone(),
    };

    let added = session.add_preset_events(&symbol).map_err(|e| e.to_string())?;

    if session.has_data() {
        out.clear();
    }
    out.print(format!("Added {} preset events for {}", added, symbol));
    redraw_if_loaded(session, out).await
}

/// `$clear` / `$event clear`
pub async fn execute_clear(session: &mut ChartSession, out: &mut OutputArea) -> Result<(), String> {
    session.clear_events();

    if session.has_data() {
        out.clear();
    }
    out.print("All events cleared");
    redraw_if_loaded(session, out).await
}

/// `$events`
pub fn execute_list(session: &ChartSession, out: &mut OutputArea) -> Result<(), String> {
    if session.events().is_empty() {
        out.print("No events added yet. Use `$event add <YYYY-MM-DD> <description>`.");
        return Ok(());
    }

    let mut table = Table::new(&["#", "Date", "Description", "Color", "Image"]);
    for (i, event) in session.events().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            event.date.format("%Y-%m-%d").to_string(),
            event.description.clone(),
            event.color.clone(),
            event.image_url.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    out.print(table.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_args_with_flags() {
        let parsed = parse_add_args("2023-06-01 Big --color #00FF00 day --image u.png").unwrap();
        assert_eq!(
            parsed,
            EventArgs {
                date: Some("2023-06-01".to_string()),
                color: Some("#00FF00".to_string()),
                image_url: Some("u.png".to_string()),
                description: "Big day".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_add_args_missing_parts() {
        assert_eq!(parse_add_args("").unwrap(), EventArgs::default());

        let date_only = parse_add_args("2023-06-01").unwrap();
        assert_eq!(date_only.date.as_deref(), Some("2023-06-01"));
        assert!(date_only.description.is_empty());

        assert!(parse_add_args("2023-06-01 x --color").is_err());
    }

    #[test]
    fn test_description_keeps_inner_spacing() {
        let parsed = parse_add_args("2023-06-01   Q1  results:   beat\testimates").unwrap();
        assert_eq!(parsed.description, "Q1  results:   beat\testimates");

        let flagged = parse_add_args("2023-06-01 Q1  results --color #00FF00 then  more").unwrap();
        assert_eq!(flagged.description, "Q1  results then  more");
        assert_eq!(flagged.color.as_deref(), Some("#00FF00"));
    }

    #[test]
    fn test_words_with_offsets() {
        assert_eq!(words_with_offsets(" a  bc "), vec![(1, "a"), (4, "bc")]);
        assert!(words_with_offsets("   ").is_empty());
    }
}
