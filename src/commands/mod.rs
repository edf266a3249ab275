pub mod help;
pub mod load;
pub mod select;
pub mod event;
pub mod chart;

use tracing::{debug, error};

use crate::session::ChartSession;
use crate::utils::OutputArea;

/// What the console should do after a line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one console line against the session, printing results into `out`
pub async fn handle_line(session: &mut ChartSession, out: &mut OutputArea, line: &str) -> Flow {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Flow::Continue;
    };

    if !command.starts_with('$') {
        out.print("Commands start with '$'. Type $help for the list.");
        return Flow::Continue;
    }

    debug!("Command {} with args {:?}", command, args);
    // Raw text after the command, for arguments whose spacing matters
    let raw_args = line.trim_start().get(command.len()..).unwrap_or("");

    let result = match command.to_lowercase().as_str() {
        "$help" => help::execute(out),
        "$load" => load::execute(session, out, args).await,
        "$symbol" => select::execute_symbol(session, out, args),
        "$period" => select::execute_period(session, out, args),
        "$interval" => select::execute_interval(session, out, args),
        "$asset" => select::execute_asset(session, out, args),
        "$event" => event::execute(session, out, raw_args).await,
        "$events" => event::execute_list(session, out),
        "$clear" => event::execute_clear(session, out).await,
        "$update" | "$redraw" => chart::execute_update(session, out).await,
        "$theme" => chart::execute_theme(session, out, args).await,
        "$status" => chart::execute_status(session, out),
        "$quit" | "$exit" => return Flow::Quit,
        _ => Err(format!("Unknown command '{}'. Type $help for the list.", command)),
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);
        out.print(format!("❌ {}", e));
    }

    Flow::Continue
}
