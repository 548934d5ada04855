//! halo-sql-compose：可组合的 SQL 语句拼装与参数绑定库（MySQL / PostgreSQL）。

pub mod bindings;
pub mod case;
pub mod clause;
pub mod cte;
#[cfg(test)]
mod cte_tests;
pub mod delete;
pub mod dialect;
pub mod field_value;
pub mod flavor;
pub mod insert;
pub mod label;
pub mod quote;
pub mod select;
pub mod statement;
pub mod string_builder;
pub mod union;
#[cfg(test)]
mod union_tests;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;
pub mod where_clause;
#[cfg(test)]
mod where_clause_tests;

pub use crate::bindings::{Bindings, IntoBindValues, PLACEHOLDER};
pub use crate::case::{CaseBuilder, WhenBuilder};
pub use crate::clause::{ClauseStack, Fragment};
pub use crate::cte::{RecursiveCte, WithBuilder};
pub use crate::delete::DeleteBuilder;
pub use crate::dialect::Dialect;
pub use crate::field_value::{FieldValue, FieldValueSet};
pub use crate::flavor::{
    DefaultFlavorGuard, DialectError, Flavor, default_flavor, set_default_flavor,
    set_default_flavor_scoped,
};
pub use crate::insert::InsertBuilder;
pub use crate::label::{LABEL_PREFIX, LabelGenerator};
pub use crate::quote::{Phrase, Quoter};
pub use crate::select::{JoinDirection, NullOrder, OrderDirection, SelectBuilder};
pub use crate::statement::{SharedStatement, Statement, shared};
pub use crate::union::{UnionBuilder, UnionType};
pub use crate::update::UpdateBuilder;
pub use crate::value::SqlValue;
pub use crate::where_clause::{Where, WhereChain, WhereClause};
