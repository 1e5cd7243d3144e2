mod entity_table;
pub use entity_table::*;

mod predicate;
pub use predicate::*;

mod statistics;
pub use statistics::*;

mod table_row;
pub use table_row::*;
