//! Record tables, the enrollment association, and list filters.

mod query;
mod relation;
#[allow(clippy::module_inception)]
mod table;

pub use query::CourseFilter;
pub use relation::Association;
pub use table::Table;
