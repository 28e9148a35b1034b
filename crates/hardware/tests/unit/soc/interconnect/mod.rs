/// Fixed-address checks of the memory map.
pub mod address_map;
