pub mod companies;
pub mod conferences;
pub mod countries;

pub use companies::BIG_TECH_COMPANIES;
pub use conferences::{display_name, is_duplicate_stem};
