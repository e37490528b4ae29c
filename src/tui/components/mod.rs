// UI components
//
// Each component is a thin drawing function over the app state. All state
// mutation happens in `App`; components only read.

pub mod input_panel;
pub mod params_panel;
pub mod result_panel;
pub mod status_bar;
pub mod technique_panel;
pub mod title_bar;
pub mod toast;
