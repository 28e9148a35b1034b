/// Extension-based format selection.
pub mod format_detection;

/// Intel HEX images loaded into RAM.
pub mod ihex_loading;
