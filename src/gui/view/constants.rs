//! View constants (layout/sizing).

pub(crate) const PANEL_W: f32 = 420.0;
pub(crate) const LABEL_W: f32 = 90.0;

pub(crate) const TITLE_TEXT: f32 = 20.0;
pub(crate) const STATUS_TEXT: f32 = 12.0;
pub(crate) const RESULT_TEXT: f32 = 16.0;
