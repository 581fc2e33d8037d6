pub mod asset_panel;
pub mod measurements;
pub mod properties;
pub mod render_modal;
pub mod status_bar;
pub mod toolbar;
pub mod watermark;
