mod central_panel;
mod controls_panel;
mod modal;
mod result_panel;

pub use central_panel::central_panel;
pub use controls_panel::controls_panel;
pub use modal::modal;
pub use result_panel::result_panel;
