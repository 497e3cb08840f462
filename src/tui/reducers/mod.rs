pub mod calendar;
pub mod data_loading;
pub mod navigation;
pub mod panels;
pub mod rankings;
pub mod settings;

pub use calendar::reduce_calendar;
pub use data_loading::reduce_data_loading;
pub use navigation::reduce_navigation;
pub use panels::reduce_panel;
pub use rankings::reduce_rankings;
pub use settings::reduce_settings;
