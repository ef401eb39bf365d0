pub mod chart;
pub mod error;
pub mod output;
pub mod plot_from_csv;
pub mod table;
pub mod utils;

pub use crate::chart::{render, ChartOutcome, ChartPlan, ChartTarget};
pub use crate::error::ChartError;
pub use crate::output::{plotly_figure, save_chart, BrowserViewer, ChartViewer};
pub use crate::table::Table;
pub use crate::utils::TickStep;

// constants
pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
/// Size in pixels of the saved figures, 10 x 6 inches at 100 dpi.
pub const FIG_SIZE: (u32, u32) = (1000, 600);
pub const CAPTION_FONT_SIZE: f64 = 30.;
pub const LABEL_FONT_SIZE: f64 = 18.;
/// Upper bound on the number of x ticks a step may generate.
pub const MAX_X_TICKS: usize = 1000;
