pub mod widget_config;
pub mod widget_preview;
pub mod widgets;
