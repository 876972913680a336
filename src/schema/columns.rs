//! Column names of the MMS data tables with a fixed type mapping.
//!
//! The first four columns of every MMS table are the record descriptor
//! (`I`, report type, report subtype, report version). Their header cells
//! double as column names.

/// Record type marker (`D` on data rows, `C` on the trailer)
pub const RECORD_TYPE: &str = "I";
/// Report type of the BIDS file family
pub const REPORT_TYPE: &str = "BIDS";
/// Report subtype of the current bid-per-offer table
pub const REPORT_SUBTYPE: &str = "BIDOFFERPERIOD";
/// Report subtype used by the legacy bid-per-offer table
pub const LEGACY_REPORT_SUBTYPE: &str = "BIDPEROFFER";
/// Report version column (its header cell is literally `1`)
pub const REPORT_VERSION: &str = "1";

/// Dispatchable unit identifier
pub const DUID: &str = "DUID";
/// Bid type (ENERGY or one of the FCAS markets)
pub const BIDTYPE: &str = "BIDTYPE";
/// Trading date the offer applies to
pub const TRADINGDATE: &str = "TRADINGDATE";
/// Time the offer was submitted
pub const OFFERDATETIME: &str = "OFFERDATETIME";
/// Settlement date, used by tables without a trading date
pub const SETTLEMENTDATE: &str = "SETTLEMENTDATE";
/// Dispatch interval number within the trading day
pub const PERIODID: &str = "PERIODID";
/// Maximum availability (MW)
pub const MAXAVAIL: &str = "MAXAVAIL";
/// Fixed load (MW)
pub const FIXEDLOAD: &str = "FIXEDLOAD";
/// Ramp up rate (MW/min)
pub const RAMPUPRATE: &str = "RAMPUPRATE";
/// Ramp down rate (MW/min)
pub const RAMPDOWNRATE: &str = "RAMPDOWNRATE";
/// FCAS enablement minimum
pub const ENABLEMENTMIN: &str = "ENABLEMENTMIN";
/// FCAS enablement maximum
pub const ENABLEMENTMAX: &str = "ENABLEMENTMAX";
/// FCAS low breakpoint
pub const LOWBREAKPOINT: &str = "LOWBREAKPOINT";
/// FCAS high breakpoint
pub const HIGHBREAKPOINT: &str = "HIGHBREAKPOINT";
/// Availability in price band 1
pub const BANDAVAIL1: &str = "BANDAVAIL1";
/// Availability in price band 2
pub const BANDAVAIL2: &str = "BANDAVAIL2";
/// Availability in price band 3
pub const BANDAVAIL3: &str = "BANDAVAIL3";
/// Availability in price band 4
pub const BANDAVAIL4: &str = "BANDAVAIL4";
/// Availability in price band 5
pub const BANDAVAIL5: &str = "BANDAVAIL5";
/// Availability in price band 6
pub const BANDAVAIL6: &str = "BANDAVAIL6";
/// Availability in price band 7
pub const BANDAVAIL7: &str = "BANDAVAIL7";
/// Availability in price band 8
pub const BANDAVAIL8: &str = "BANDAVAIL8";
/// Availability in price band 9
pub const BANDAVAIL9: &str = "BANDAVAIL9";
/// Availability in price band 10
pub const BANDAVAIL10: &str = "BANDAVAIL10";
/// PASA availability (MW)
pub const PASAAVAILABILITY: &str = "PASAAVAILABILITY";

/// Partition columns tried, in order, when none is requested
pub const DEFAULT_PARTITION_COLUMNS: [&str; 2] = [TRADINGDATE, SETTLEMENTDATE];
