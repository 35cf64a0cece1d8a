pub mod header;
pub mod resume_list;
pub mod analyzer_page;
pub mod file_picker;
pub mod busy_indicator;
pub mod result_view;
