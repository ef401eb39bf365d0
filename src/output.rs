use crate::chart::ChartPlan;
use crate::error::ChartError;
use crate::{CAPTION_FONT_SIZE, FIG_SIZE, LABEL_FONT_SIZE};
use log::{debug, info};
use plotly::common::{Mode, TickMode, Title};
use plotly::layout::{Axis, AxisType, Layout};
use plotly::{Plot, Scatter};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Shows a chart interactively.
pub trait ChartViewer {
    fn show(&self, plan: &ChartPlan) -> Result<(), ChartError>;
}

/// Opens the chart as an interactive plotly page in the default browser.
pub struct BrowserViewer;

impl ChartViewer for BrowserViewer {
    fn show(&self, plan: &ChartPlan) -> Result<(), ChartError> {
        info!("> open {} in the browser", plan.title);
        plotly_figure(plan).show();
        Ok(())
    }
}

/// Write the chart to fout, the format given by the extension:
/// svg, png, jpg, jpeg, bmp or html.
/// Without an extension a png is written next to fout.
/// Returns the path actually written.
pub fn save_chart<P>(plan: &ChartPlan, fout: P) -> Result<PathBuf, ChartError>
where
    P: AsRef<Path>,
{
    let fout = fout.as_ref();
    let ext = match fout.extension() {
        Some(e) => e.to_string_lossy().to_lowercase(),
        None => {
            let png = fout.with_extension("png");
            debug!("no extension in {}, save as {}", fout.display(), png.display());
            draw_chart(BitMapBackend::new(&png, FIG_SIZE).into_drawing_area(), plan)?;
            return Ok(png);
        }
    };
    match ext.as_str() {
        "svg" => draw_chart(SVGBackend::new(fout, FIG_SIZE).into_drawing_area(), plan)?,
        "png" | "jpg" | "jpeg" | "bmp" => {
            draw_chart(BitMapBackend::new(fout, FIG_SIZE).into_drawing_area(), plan)?
        }
        "html" => std::fs::write(fout, plotly_figure(plan).to_html())?,
        _ => return Err(ChartError::UnsupportedFormat(ext)),
    }
    Ok(fout.to_path_buf())
}

/// Draw the chart on any plotters backend.
/// Segments between missing values are drawn as separate lines.
fn draw_chart<DB>(root: DrawingArea<DB, Shift>, plan: &ChartPlan) -> Result<(), ChartError>
where
    DB: DrawingBackend,
{
    let draw_err = |e: DrawingAreaErrorKind<DB::ErrorType>| ChartError::Draw(e.to_string());
    let (xmin, xmax) = plan.x_range;
    let (ymin, ymax) = plan.y_range;
    root.fill(&WHITE).map_err(draw_err)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(30)
        .caption(&plan.title, ("sans-serif", CAPTION_FONT_SIZE))
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(
            (xmin..xmax).with_key_points(plan.x_ticks.clone()),
            (ymin..ymax).log_scale(),
        )
        .map_err(draw_err)?;
    chart
        .configure_mesh()
        .bold_line_style(RGBColor(100, 100, 100).mix(0.5))
        .light_line_style(RGBColor(180, 180, 180).mix(0.3))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .x_desc(plan.x_label.as_str())
        .y_desc(plan.y_label.as_str())
        .draw()
        .map_err(draw_err)?;
    for segment in plan
        .points
        .split(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        if segment.len() < 2 {
            continue;
        }
        chart
            .draw_series(LineSeries::new(segment.iter().copied(), BLUE.stroke_width(2)))
            .map_err(draw_err)?;
    }
    root.present().map_err(draw_err)?;
    Ok(())
}

/// The chart as a plotly figure, used for the browser and for html files.
pub fn plotly_figure(plan: &ChartPlan) -> Plot {
    let (x, y): (Vec<f64>, Vec<f64>) = plan.points.iter().copied().unzip();
    let trace = Scatter::new(x, y).mode(Mode::Lines).name(plan.y_label.as_str());
    let x_axis = Axis::new()
        .title(Title::new(plan.x_label.as_str()))
        .tick_mode(TickMode::Array)
        .tick_values(plan.x_ticks.clone())
        .range(vec![plan.x_range.0, plan.x_range.1])
        .show_grid(true);
    let y_axis = Axis::new()
        .title(Title::new(plan.y_label.as_str()))
        .type_(AxisType::Log)
        .show_grid(true);
    let layout = Layout::new()
        .title(Title::new(plan.title.as_str()))
        .x_axis(x_axis)
        .y_axis(y_axis);
    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}
