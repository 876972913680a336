use std::fmt;

use serde::{Deserialize, Serialize};

use super::columns::*;
use super::types::ColumnType;

/// Kind of MMS data table held by a raw file.
///
/// Exactly one table kind per file. Kinds without a fixed type mapping are
/// `Unrecognized` and resolve to [`Schema::Untyped`](super::Schema::Untyped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// BIDS / BIDPEROFFER (a.k.a. BIDOFFERPERIOD) bid availability table
    BidPerOffer,
    /// Any other table
    Unrecognized,
}

impl TableKind {
    /// Detect the table kind from the file stem and the header row.
    ///
    /// The stem check mirrors the publisher's naming
    /// (`PUBLIC_DVD_BIDPEROFFER_202107010000.CSV`); the header check covers
    /// renamed files whose descriptor columns still read `I,BIDS,BIDOFFERPERIOD`.
    pub fn detect(file_stem: &str, header: &[String]) -> Self {
        if file_stem.to_uppercase().contains(LEGACY_REPORT_SUBTYPE) {
            return TableKind::BidPerOffer;
        }

        match (header.get(1).map(String::as_str), header.get(2).map(String::as_str)) {
            (Some(REPORT_TYPE), Some(REPORT_SUBTYPE | LEGACY_REPORT_SUBTYPE)) => {
                TableKind::BidPerOffer
            }
            _ => TableKind::Unrecognized,
        }
    }

    /// Fixed type of `column` for this table kind
    pub fn column_type(&self, column: &str) -> ColumnType {
        match self {
            TableKind::BidPerOffer => bid_per_offer_type(column),
            TableKind::Unrecognized => ColumnType::Utf8,
        }
    }

    /// Short name written to segment metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::BidPerOffer => "BIDPEROFFER",
            TableKind::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Integer-like columns are float32 so that missing values stay representable.
fn bid_per_offer_type(column: &str) -> ColumnType {
    match column {
        // Legacy extracts carry SETTLEMENTDATE instead of TRADINGDATE
        TRADINGDATE | OFFERDATETIME | SETTLEMENTDATE => ColumnType::Timestamp,
        REPORT_VERSION | PERIODID | MAXAVAIL | FIXEDLOAD | ENABLEMENTMIN | ENABLEMENTMAX
        | LOWBREAKPOINT | HIGHBREAKPOINT | BANDAVAIL1 | BANDAVAIL2 | BANDAVAIL3 | BANDAVAIL4
        | BANDAVAIL5 | BANDAVAIL6 | BANDAVAIL7 | BANDAVAIL8 | BANDAVAIL9 | BANDAVAIL10 => {
            ColumnType::Float32
        }
        RAMPUPRATE | RAMPDOWNRATE | PASAAVAILABILITY => ColumnType::Float64,
        _ => ColumnType::Utf8,
    }
}
