pub mod board_view;
pub mod dialogs;
pub mod list_view;
pub mod project_header;
pub mod theme;
pub mod timeline;
pub mod toast;
pub mod toolbar;
