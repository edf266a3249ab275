//! Chart configuration models: the closed selections a session can be set to

use std::fmt;
use std::str::FromStr;

/// Lookback window requested from the market-data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
    ];

    /// Provider code, e.g. `1y`
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "1 Month",
            Period::ThreeMonths => "3 Months",
            Period::SixMonths => "6 Months",
            Period::OneYear => "1 Year",
            Period::TwoYears => "2 Years",
            Period::FiveYears => "5 Years",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown period: '{}'. Supported: 1mo, 3mo, 6mo, 1y, 2y, 5y", s))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling granularity of the fetched bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Hourly,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
        Interval::Hourly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
            Interval::Hourly => "1h",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
            Interval::Hourly => "Hourly",
        }
    }

    /// Intraday bars keep their wall-clock time; the rest are pinned to midnight
    pub fn is_intraday(&self) -> bool {
        matches!(self, Interval::Hourly)
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown interval: '{}'. Supported: 1d, 1wk, 1mo, 1h", s))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetType {
    #[default]
    Stock,
    Crypto,
    Etf,
    Index,
}

impl AssetType {
    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Stock => "Stock",
            AssetType::Crypto => "Crypto",
            AssetType::Etf => "ETF",
            AssetType::Index => "Index",
        }
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" => Ok(AssetType::Stock),
            "crypto" => Ok(AssetType::Crypto),
            "etf" => Ok(AssetType::Etf),
            "index" => Ok(AssetType::Index),
            _ => Err(format!("Unknown asset type: '{}'. Supported: stock, crypto, etf, index", s)),
        }
    }
}

/// Symbols offered as suggestions in the help text
pub const KNOWN_SYMBOLS: &[(&str, &str, AssetType)] = &[
    ("AAPL", "Apple Inc.", AssetType::Stock),
    ("MSFT", "Microsoft Corporation", AssetType::Stock),
    ("GOOGL", "Alphabet Inc.", AssetType::Stock),
    ("AMZN", "Amazon.com, Inc.", AssetType::Stock),
    ("NVDA", "NVIDIA Corporation", AssetType::Stock),
    ("TSLA", "Tesla, Inc.", AssetType::Stock),
    ("BTC-USD", "Bitcoin", AssetType::Crypto),
    ("ETH-USD", "Ethereum", AssetType::Crypto),
    ("SPY", "SPDR S&P 500 ETF Trust", AssetType::Etf),
    ("^GSPC", "S&P 500", AssetType::Index),
];

/// Colors used when drawing a chart, as `#RRGGBB` strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub grid: &'static str,
    pub text: &'static str,
    pub line: &'static str,
    pub volume: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette {
                background: "#1E1E1E",
                grid: "#2A2A2A",
                text: "#E0E0E0",
                line: "#2962FF",
                volume: "#5D6D7E",
            },
            Theme::Light => ThemePalette {
                background: "#FFFFFF",
                grid: "#F0F0F0",
                text: "#333333",
                line: "#2962FF",
                volume: "#5D6D7E",
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme: '{}'. Use: dark, light", s)),
        }
    }
}

/// The selections currently applied to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub asset_type: AssetType,
    pub symbol: String,
    pub period: Period,
    pub interval: Interval,
    pub theme: Theme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            asset_type: AssetType::Stock,
            symbol: "AAPL".to_string(),
            period: Period::OneYear,
            interval: Interval::Daily,
            theme: Theme::Dark,
        }
    }
}
