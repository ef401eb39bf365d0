use csv_logplot::plot_from_csv::{parse_cli, report_outcome};
use csv_logplot::{render, BrowserViewer, Table};
use flexi_logger::Logger;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;

    let (csv_file, axe_x, step_x, axe_y, save_plot) = parse_cli();

    info!("> read data from {}", csv_file.display());
    let table = Table::from_csv(&csv_file)?;

    let result = render(
        &table,
        &axe_x,
        step_x,
        &axe_y,
        save_plot.as_deref(),
        &BrowserViewer,
    );
    // invalid columns are reported, not fatal
    if let Some(msg) = report_outcome(result)? {
        println!("{}", msg);
    }
    Ok(())
}
