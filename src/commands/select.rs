use crate::models::config::{AssetType, Interval, Period};
use crate::session::ChartSession;
use crate::utils::OutputArea;

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, String> {
    match args {
        [value] => Ok(value),
        _ => Err(format!("Usage: `{}`", usage)),
    }
}

pub fn execute_symbol(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    let symbol = single_arg(args, "$symbol <SYMBOL>")?;
    session.set_symbol(symbol);
    out.print(format!("Symbol set to {}", session.config().symbol));
    Ok(())
}

pub fn execute_period(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    let period: Period = single_arg(args, "$period <1mo|3mo|6mo|1y|2y|5y>")?.parse()?;
    session.set_period(period);
    out.print(format!("Time period set to {}", period.label()));
    Ok(())
}

pub fn execute_interval(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    let interval: Interval = single_arg(args, "$interval <1d|1wk|1mo|1h>")?.parse()?;
    session.set_interval(interval);
    out.print(format!("Interval set to {}", interval.label()));
    Ok(())
}

pub fn execute_asset(session: &mut ChartSession, out: &mut OutputArea, args: &[&str]) -> Result<(), String> {
    let asset_type: AssetType = single_arg(args, "$asset <stock|crypto|etf|index>")?.parse()?;
    session.set_asset_type(asset_type);
    out.print(format!("Asset type set to {}", asset_type.label()));
    Ok(())
}
