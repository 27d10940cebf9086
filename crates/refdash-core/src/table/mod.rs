//! Table ordering.
//!
//! Every table the dashboard shows (commits, pull requests) goes through
//! [`stable_sort`] before rendering. Rows expose their cells through the
//! [`Row`] trait; the active column is a [`SortSpec`].
//!
//! # Usage
//!
//! ```ignore
//! use refdash_core::table::{stable_sort, Order};
//!
//! let sorted = stable_sort(&rows, "date", Order::Ascending);
//! ```

mod order;
mod sort;
mod value;

pub use order::{Order, SortSpec};
pub use sort::stable_sort;
pub use value::{Row, SortValue};
