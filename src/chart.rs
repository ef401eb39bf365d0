use crate::error::ChartError;
use crate::output::{save_chart, ChartViewer};
use crate::table::Table;
use crate::utils::{min_and_max, pad_log_range, x_ticks, TickStep};
use log::info;
use std::path::{Path, PathBuf};

/// Where a rendered chart goes.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartTarget {
    Display,
    File(PathBuf),
}

impl From<Option<&Path>> for ChartTarget {
    fn from(p: Option<&Path>) -> Self {
        match p {
            Some(p) => ChartTarget::File(p.to_path_buf()),
            None => ChartTarget::Display,
        }
    }
}

/// What a successful render did.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Displayed,
    /// Path actually written, which gets a .png extension when none was given.
    Saved(PathBuf),
}

/// A validated, backend independent description of the line chart.
/// The y axis is always logarithmic, so every finite y in points is > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// (x, y) in row order; missing cells are NAN and break the line.
    pub points: Vec<(f64, f64)>,
    pub x_ticks: Vec<f64>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl ChartPlan {
    /// Check the columns and compute everything needed to draw.
    /// Checks run in order: both columns exist, y is numeric, y is strictly positive,
    /// x is numeric, at least one row is finite in both.
    pub fn build(
        table: &Table,
        x_column: &str,
        tick_step: TickStep,
        y_column: &str,
    ) -> Result<ChartPlan, ChartError> {
        let mut missing: Vec<String> = Vec::new();
        for c in [x_column, y_column] {
            if !table.has_column(c) && !missing.iter().any(|m| m == c) {
                missing.push(c.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(ChartError::MissingColumn {
                x_column: x_column.to_string(),
                y_column: y_column.to_string(),
                missing,
            });
        }

        let y = table.numeric_values(y_column)?;
        if let Some((row, value)) = y.iter().enumerate().find(|(_, v)| **v <= 0.) {
            return Err(ChartError::NonPositiveYValue {
                column: y_column.to_string(),
                row,
                value: *value,
            });
        }

        let x = table.numeric_values(x_column)?;
        let points: Vec<(f64, f64)> = x.into_iter().zip(y).collect();
        let (finite_x, finite_y): (Vec<f64>, Vec<f64>) = points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .copied()
            .unzip();
        let no_data = || ChartError::NoPlottableData {
            x_column: x_column.to_string(),
            y_column: y_column.to_string(),
        };
        let (xmin, xmax) = min_and_max(finite_x.iter()).ok_or_else(no_data)?;
        let (ymin, ymax) = min_and_max(finite_y.iter()).ok_or_else(no_data)?;

        let ticks = x_ticks(tick_step, xmax)?;
        let last_tick = ticks.last().copied().unwrap_or(0.);
        let xlo = xmin.min(0.);
        let mut xhi = xmax.max(last_tick);
        if xhi <= xlo {
            xhi = xlo + tick_step.get();
        }

        Ok(ChartPlan {
            title: format!("Plot {} vs {}", x_column, y_column),
            x_label: x_column.to_string(),
            y_label: y_column.to_string(),
            points,
            x_ticks: ticks,
            x_range: (xlo, xhi),
            y_range: pad_log_range(ymin, ymax),
        })
    }
}

/// Validate the two columns and produce one chart,
/// saved to output_path when given, otherwise handed to the viewer.
/// Nothing is drawn when validation fails.
pub fn render<V>(
    table: &Table,
    x_column: &str,
    tick_step: TickStep,
    y_column: &str,
    output_path: Option<&Path>,
    viewer: &V,
) -> Result<ChartOutcome, ChartError>
where
    V: ChartViewer + ?Sized,
{
    let plan = ChartPlan::build(table, x_column, tick_step, y_column)?;
    info!(
        "> plot {} points of {} vs {}, x step {}",
        plan.points.len(),
        x_column,
        y_column,
        tick_step
    );
    match ChartTarget::from(output_path) {
        ChartTarget::File(p) => {
            let written = save_chart(&plan, &p)?;
            info!("> saved plot to {}", written.display());
            Ok(ChartOutcome::Saved(written))
        }
        ChartTarget::Display => {
            viewer.show(&plan)?;
            Ok(ChartOutcome::Displayed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    /// Keeps the title of every chart it is asked to show.
    #[derive(Default)]
    struct RecordingViewer {
        shown: RefCell<Vec<String>>,
    }

    impl ChartViewer for RecordingViewer {
        fn show(&self, plan: &ChartPlan) -> Result<(), ChartError> {
            self.shown.borrow_mut().push(plan.title.clone());
            Ok(())
        }
    }

    fn tv_table() -> Table {
        let df = polars::df!("t" => [0.0, 1.0, 2.0], "v" => [1.0, 10.0, 5.0]).unwrap();
        Table::from_dataframe(df)
    }

    fn step(s: f64) -> TickStep {
        TickStep::new(s).unwrap()
    }

    #[test]
    fn plan_for_simple_table() {
        let plan = ChartPlan::build(&tv_table(), "t", step(1.), "v").unwrap();
        assert_eq!(plan.title, "Plot t vs v");
        assert_eq!(plan.x_label, "t");
        assert_eq!(plan.y_label, "v");
        assert_eq!(plan.x_ticks, vec![0., 1., 2.]);
        assert_eq!(plan.points, vec![(0., 1.), (1., 10.), (2., 5.)]);
        assert_eq!(plan.x_range, (0., 2.));
        assert!(plan.y_range.0 > 0. && plan.y_range.0 < 1.);
        assert!(plan.y_range.1 > 10.);
    }

    #[test]
    fn render_without_path_shows_once() {
        let viewer = RecordingViewer::default();
        let outcome = render(&tv_table(), "t", step(1.), "v", None, &viewer).unwrap();
        assert_eq!(outcome, ChartOutcome::Displayed);
        assert_eq!(*viewer.shown.borrow(), vec!["Plot t vs v".to_string()]);
    }

    #[test]
    fn render_with_path_writes_file_and_does_not_show() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plot.html");
        let viewer = RecordingViewer::default();
        let outcome = render(&tv_table(), "t", step(1.), "v", Some(out.as_path()), &viewer).unwrap();
        assert_eq!(outcome, ChartOutcome::Saved(out.clone()));
        assert!(out.exists());
        assert!(viewer.shown.borrow().is_empty());
    }

    #[test]
    fn missing_column_names_both_requested_columns() {
        let viewer = RecordingViewer::default();
        let err = render(&tv_table(), "t", step(1.), "missing", None, &viewer).unwrap_err();
        match &err {
            ChartError::MissingColumn {
                x_column,
                y_column,
                missing,
            } => {
                assert_eq!(x_column, "t");
                assert_eq!(y_column, "missing");
                assert_eq!(missing, &vec!["missing".to_string()]);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        assert!(err.to_string().contains("missing"));
        assert!(err.is_rejection());
        assert!(viewer.shown.borrow().is_empty());
    }

    #[test]
    fn missing_x_column_is_reported_too() {
        let err = ChartPlan::build(&tv_table(), "time", step(1.), "v").unwrap_err();
        match err {
            ChartError::MissingColumn { missing, .. } => assert_eq!(missing, vec!["time"]),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn same_missing_name_is_listed_once() {
        let err = ChartPlan::build(&tv_table(), "w", step(1.), "w").unwrap_err();
        match err {
            ChartError::MissingColumn { missing, .. } => assert_eq!(missing, vec!["w"]),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn zero_in_y_is_rejected_before_drawing() {
        let df = polars::df!("t" => [0.0, 1.0, 2.0], "v" => [1.0, 0.0, 5.0]).unwrap();
        let viewer = RecordingViewer::default();
        let err = render(&Table::from_dataframe(df), "t", step(1.), "v", None, &viewer).unwrap_err();
        match err {
            ChartError::NonPositiveYValue { column, row, value } => {
                assert_eq!(column, "v");
                assert_eq!(row, 1);
                assert_eq!(value, 0.);
            }
            other => panic!("expected NonPositiveYValue, got {:?}", other),
        }
        assert!(viewer.shown.borrow().is_empty());
    }

    #[test]
    fn zero_in_csv_is_rejected() {
        let table = Table::from_csv("./test/with_zero.csv").unwrap();
        let err = ChartPlan::build(&table, "t", step(1.), "v").unwrap_err();
        assert!(matches!(err, ChartError::NonPositiveYValue { row: 1, .. }));
        assert!(err.is_rejection());
    }

    #[test]
    fn negative_y_is_rejected_even_with_text_x() {
        let df = polars::df!("day" => ["mon", "tue"], "v" => [3.0, -1.0]).unwrap();
        let err = ChartPlan::build(&Table::from_dataframe(df), "day", step(1.), "v").unwrap_err();
        assert!(matches!(err, ChartError::NonPositiveYValue { row: 1, .. }));
    }

    #[test]
    fn text_x_column_is_rejected() {
        let table = Table::from_csv("./test/text_x.csv").unwrap();
        let err = ChartPlan::build(&table, "day", step(1.), "v").unwrap_err();
        match err {
            ChartError::NonNumericColumn { column, .. } => assert_eq!(column, "day"),
            other => panic!("expected NonNumericColumn, got {:?}", other),
        }
    }

    #[test]
    fn header_only_file_has_nothing_to_plot() {
        let table = Table::from_csv("./test/header_only.csv").unwrap();
        let err = ChartPlan::build(&table, "t", step(1.), "v").unwrap_err();
        assert!(matches!(err, ChartError::NoPlottableData { .. }));
        assert!(err.is_rejection());
    }

    #[test]
    fn missing_cells_are_gaps_not_errors() {
        let df = polars::df!(
            "t" => [Some(0.0), Some(1.0), None, Some(3.0)],
            "v" => [Some(2.0), None, Some(4.0), Some(8.0)]
        )
        .unwrap();
        let plan = ChartPlan::build(&Table::from_dataframe(df), "t", step(1.), "v").unwrap();
        assert_eq!(plan.points.len(), 4);
        assert!(plan.points[1].1.is_nan());
        assert!(plan.points[2].0.is_nan());
        assert_eq!(plan.x_ticks, vec![0., 1., 2., 3.]);
    }

    #[test]
    fn unsorted_x_keeps_row_order_and_ticks_cover_max() {
        let df = polars::df!("t" => [3.5, 0.5, 2.0], "v" => [1.0, 2.0, 3.0]).unwrap();
        let plan = ChartPlan::build(&Table::from_dataframe(df), "t", step(1.), "v").unwrap();
        assert_eq!(plan.points[0], (3.5, 1.));
        assert_eq!(plan.x_ticks, vec![0., 1., 2., 3., 4.]);
        assert_eq!(plan.x_range, (0., 4.));
    }

    #[test]
    fn rendering_twice_gives_the_same_chart() {
        let table = Table::from_csv("./test/decay.csv").unwrap();
        let first = ChartPlan::build(&table, "t", step(2.), "v").unwrap();
        let second = ChartPlan::build(&table, "t", step(2.), "v").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.x_ticks, vec![0., 2., 4., 6.]);
        assert_eq!(table.numeric_values("v").unwrap().len(), 6);
    }

    #[test]
    fn target_follows_optional_path() {
        assert_eq!(ChartTarget::from(None), ChartTarget::Display);
        let p = Path::new("out.png");
        assert_eq!(
            ChartTarget::from(Some(p)),
            ChartTarget::File(PathBuf::from("out.png"))
        );
    }
}
