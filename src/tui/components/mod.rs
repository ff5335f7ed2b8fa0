// Components module - building blocks of the page shell
//
// - Sidebar: name, primary tagline, section nav
// - Page: backdrop, document rows, taglines, scrollbar
// - Status bar: active section, position, focus hints
// - Logs panel: system log entries (toggled)
// - Toast: transient confirmation overlay

pub mod backdrop;
pub mod logs_panel;
pub mod page;
pub mod scrollbar;
pub mod sidebar;
pub mod status_bar;
pub mod toast;

pub use logs_panel::LogsPanel;
pub use page::{PagePanel, Taglines};
pub use toast::Toast;
