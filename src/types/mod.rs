pub mod output_units;
pub mod product;
pub mod station;
