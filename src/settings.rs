//! Identity strings for this product, used in iCal PRODIDs and export file names

/// Part of the ProdID string that describes the organization (example of a ProdID string: `-//ABC Corporation//My Product//EN`).
pub const ORG_NAME: &str = "Daybook project";

/// Part of the ProdID string that describes the product name.
/// Also used (lowercased) in exported file names and event UIDs.
pub const PRODUCT_NAME: &str = "Daybook";
