// Store abstraction: the seam between the typed service layer and whatever
// backend persists the rows.

pub mod adapter;

pub use adapter::{FindQuery, Operator, SortBy, SortDirection, StoreAdapter, WhereClause};
