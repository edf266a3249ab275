use crate::models::config::{Interval, Period};
use crate::session::ChartSession;
use crate::utils::OutputArea;

/// `$load [SYMBOL] [PERIOD] [INTERVAL]`
pub async fn execute(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    tracing::info!("📈 Load command called with args: {:?}", args);

    // Parse everything before touching the session so a typo changes nothing
    let period = args.get(1).map(|p| p.parse::<Period>()).transpose()?;
    let interval = args.get(2).map(|i| i.parse::<Interval>()).transpose()?;

    if let Some(symbol) = args.first() {
        session.set_symbol(symbol);
    }
    if let Some(period) = period {
        session.set_period(period);
    }
    if let Some(interval) = interval {
        session.set_interval(interval);
    }

    out.clear();
    session.load(out).await.map_err(|e| e.to_string())
}
