pub mod plot;
pub mod tooltip;
pub mod x_axis;
pub mod y_axis;
