//! Reference data module.
//!
//! Federation tables embedded into the binary:
//! - Target specifications (distance / face size per class)
//! - Competition categories (age × gender × bow → code)

pub mod embedded;

pub use embedded::{
    category_table_index, find_category_code, find_target_spec, get_categories, get_target_specs,
    CategoryRow, TargetSpecTable,
};
