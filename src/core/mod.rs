/// Variant keys, records, axis selections and matrix synchronization
pub mod matrix;

/// Price rounding, discount derivation and validated variant edits
pub mod pricing;

/// Bulk media assignment and per-variant media lists
pub mod media;

/// Share-link normalization and image link verification
pub mod links;

/// Product save, load and listing against the backend
pub mod product;

/// Categories, colors, sizes, display ordering and seeding
pub mod catalog;

/// Curated product reviews edited with the product form
pub mod review;
