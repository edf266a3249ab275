use crate::models::config::Theme;
use crate::session::ChartSession;
use crate::utils::OutputArea;

/// `$update`
pub async fn execute_update(session: &ChartSession, out: &mut OutputArea) -> Result<(), String> {
    if !session.has_data() {
        out.print("No data loaded yet. Use `$load` first.");
        return Ok(());
    }

    out.clear();
    session.redraw(out).await.map(|_| ()).map_err(|e| e.to_string())
}

/// `$theme [dark|light]`, toggling when no theme is given
pub async fn execute_theme(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    let theme = match args.first() {
        Some(value) => value.parse::<Theme>()?,
        None => session.config().theme.toggled(),
    };
    session.set_theme(theme);

    if session.has_data() {
        out.clear();
    }
    out.print(format!(
        "Theme set to {}",
        if theme.is_dark() { "dark" } else { "light" }
    ));
    session.redraw(out).await.map(|_| ()).map_err(|e| e.to_string())
}

/// `$status`
pub fn execute_status(session: &ChartSession, out: &mut OutputArea) -> Result<(), String> {
    let config = session.config();
    out.print("📊 Chart status");
    out.print(format!("  Asset type: {}", config.asset_type.label()));
    out.print(format!("  Symbol:     {}", config.symbol));
    out.print(format!("  Period:     {}", config.period.label()));
    out.print(format!("  Interval:   {}", config.interval.label()));
    out.print(format!("  Theme:      {}", if config.theme.is_dark() { "dark" } else { "light" }));
    out.print(format!("  Events:     {}", session.events().len()));

    match session.current() {
        Some(loaded) => {
            let range = match (loaded.series.first(), loaded.series.last()) {
                (Some(first), Some(last)) => format!(
                    " from {} to {}",
                    first.timestamp.format("%Y-%m-%d"),
                    last.timestamp.format("%Y-%m-%d")
                ),
                _ => String::new(),
            };
            out.print(format!("  Loaded:     {} ({} bars{})", loaded.symbol, loaded.series.len(), range));
        }
        None => out.print("  Loaded:     nothing yet"),
    }

    Ok(())
}
