//! Instrument catalog.
//!
//! The catalog is static data. Its order is the order of the exported rows:
//! indices, then bonds, then commodities, then crypto.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Index,
    Bond,
    Commodity,
    Crypto,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetKind::Index => "index",
            AssetKind::Bond => "bond",
            AssetKind::Commodity => "commodity",
            AssetKind::Crypto => "crypto",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub symbol: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub asset_class: &'static str,
    pub kind: AssetKind,
}

impl Instrument {
    pub const fn new(
        symbol: &'static str,
        name: &'static str,
        region: &'static str,
        asset_class: &'static str,
        kind: AssetKind,
    ) -> Self {
        Self {
            symbol,
            name,
            region,
            asset_class,
            kind,
        }
    }

    /// Yield instruments quote a percentage, so their performance is a point change.
    pub fn is_yield(&self) -> bool {
        self.kind == AssetKind::Bond
    }
}

const CATALOG: &[Instrument] = &[
    Instrument::new(
        "^GSPC",
        "S&P 500 (Large Cap)",
        "North America",
        "Equity Index",
        AssetKind::Index,
    ),
    Instrument::new(
        "^RUT",
        "Russell 2000 (Small Cap)",
        "North America",
        "Equity Small Cap Index",
        AssetKind::Index,
    ),
    Instrument::new("^FTSE", "FTSE 100 (Large Cap)", "UK", "Equity Index", AssetKind::Index),
    Instrument::new("^FTMC", "FTSE 250 (Mid Cap)", "UK", "Equity Mid Cap Index", AssetKind::Index),
    Instrument::new(
        "^GDAXI",
        "DAX 40 (Large Cap Germany)",
        "Europe",
        "Equity Index",
        AssetKind::Index,
    ),
    Instrument::new(
        "^N225",
        "Nikkei 225 (Large Cap Japan)",
        "Asia",
        "Equity Index",
        AssetKind::Index,
    ),
    Instrument::new(
        "^FVX",
        "US 5Y Treasury Yield",
        "North America",
        "Fixed Income Sovereign",
        AssetKind::Bond,
    ),
    Instrument::new(
        "^TNX",
        "US 10Y Treasury Yield",
        "North America",
        "Fixed Income Sovereign",
        AssetKind::Bond,
    ),
    Instrument::new("GC=F", "Gold", "Global", "Commodity Metal", AssetKind::Commodity),
    Instrument::new("SI=F", "Silver", "Global", "Commodity Metal", AssetKind::Commodity),
    Instrument::new("CL=F", "WTI Crude Oil", "Global", "Commodity Energy", AssetKind::Commodity),
    Instrument::new("BZ=F", "Brent Crude", "Global", "Commodity Energy", AssetKind::Commodity),
    Instrument::new("BTC-USD", "Bitcoin", "Global", "Crypto", AssetKind::Crypto),
    Instrument::new("ETH-USD", "Ethereum", "Global", "Crypto", AssetKind::Crypto),
];

pub fn catalog() -> &'static [Instrument] {
    CATALOG
}

pub fn find(symbol: &str) -> Option<&'static Instrument> {
    CATALOG.iter().find(|i| i.symbol == symbol)
}

pub fn by_kind(kind: AssetKind) -> impl Iterator<Item = &'static Instrument> {
    CATALOG.iter().filter(move |i| i.kind == kind)
}
