pub mod common;
pub mod ctx;

pub mod calendar;
pub mod entity_management;
pub mod landing;
pub mod notification_bell;
pub mod quote_editor;
pub mod table_with_filters;
