use crate::models::config::KNOWN_SYMBOLS;
use crate::utils::OutputArea;

pub fn execute(out: &mut OutputArea) -> Result<(), String> {
    out.print("📖 eventchart commands");
    out.print("");
    out.print("🎯 Asset selection");
    out.print("  $asset <stock|crypto|etf|index>   - Set asset type");
    out.print("  $symbol <SYMBOL>                  - Set symbol (e.g. AAPL, BTC-USD)");
    out.print("  $period <1mo|3mo|6mo|1y|2y|5y>    - Set time period");
    out.print("  $interval <1d|1wk|1mo|1h>         - Set interval");
    out.print("  $load [SYMBOL] [PERIOD] [INTERVAL] - Fetch data and draw the chart");
    out.print("");
    out.print("📌 Events");
    out.print("  $event add <YYYY-MM-DD> [--color #RRGGBB] [--image URL] <description>");
    out.print("  $event preset [SYMBOL]            - Add built-in events for a symbol");
    out.print("  $event clear | $clear             - Remove all events");
    out.print("  $events                           - List events");
    out.print("");
    out.print("📊 Chart");
    out.print("  $update                           - Redraw from the loaded data");
    out.print("  $theme [dark|light]               - Set or toggle the theme");
    out.print("  $status                           - Show current selections");
    out.print("  $quit                             - Leave");
    out.print("");

    let symbols = KNOWN_SYMBOLS
        .iter()
        .map(|(symbol, name, asset)| format!("{} ({}, {})", symbol, name, asset.label()))
        .collect::<Vec<_>>()
        .join(", ");
    out.print(format!("Known symbols: {}", symbols));

    Ok(())
}
