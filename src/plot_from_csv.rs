use super::VERSION;
use crate::chart::ChartOutcome;
use crate::error::ChartError;
use crate::utils::TickStep;
use clap::{value_parser, Arg, ArgMatches, Command};
use log::info;
use std::path::PathBuf;

/// The argument parser of the plot_from_csv app.
pub fn command() -> Command {
    let arg_csv_file = Arg::new("csv_file")
        .help("path to the csv file")
        .required(true)
        .value_parser(value_parser!(PathBuf));
    let arg_axe_x = Arg::new("axe_x")
        .help("name of the column for the x axis")
        .required(true);
    let arg_step_x = Arg::new("step_x")
        .help("step between the ticks of the x axis, a number > 0")
        .required(true)
        .allow_negative_numbers(true)
        .value_parser(parse_step);
    let arg_axe_y = Arg::new("axe_y")
        .help("name of the column for the logarithmic y axis")
        .required(true);
    let arg_save_plot = Arg::new("save_plot")
        .help("save the plot to this path instead of showing it (svg, png, jpg, bmp or html)")
        .long("save_plot")
        .num_args(1)
        .value_parser(value_parser!(PathBuf));
    Command::new("plot_from_csv")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot two columns of a csv file with a logarithmic y axis")
        .arg(arg_csv_file)
        .arg(arg_axe_x)
        .arg(arg_step_x)
        .arg(arg_axe_y)
        .arg(arg_save_plot)
}

fn parse_step(s: &str) -> Result<TickStep, String> {
    s.parse::<TickStep>().map_err(|e| e.to_string())
}

/// Takes the CLI arguments that control the plot:
/// csv file, x column, x step, y column and the optional output path.
pub fn parse_cli() -> (PathBuf, String, TickStep, String, Option<PathBuf>) {
    from_matches(&command().get_matches())
}

// the positional arguments are required, clap exits before this point without them,
// therefore it is safe to unwrap their get_one
fn from_matches(cli_args: &ArgMatches) -> (PathBuf, String, TickStep, String, Option<PathBuf>) {
    let csv_file = cli_args.get_one::<PathBuf>("csv_file").unwrap().to_owned();
    let axe_x = cli_args.get_one::<String>("axe_x").unwrap().to_owned();
    let step_x = *cli_args.get_one::<TickStep>("step_x").unwrap();
    let axe_y = cli_args.get_one::<String>("axe_y").unwrap().to_owned();
    let save_plot = cli_args.get_one::<PathBuf>("save_plot").cloned();
    (csv_file, axe_x, step_x, axe_y, save_plot)
}

/// What the app prints on stdout for a render result.
/// Rejected columns give their message and are not an error of the app;
/// every other error is passed on and ends the process with a failure.
pub fn report_outcome(
    result: Result<ChartOutcome, ChartError>,
) -> Result<Option<String>, ChartError> {
    match result {
        Ok(ChartOutcome::Saved(p)) => {
            info!("> done, plot saved to {}", p.display());
            Ok(None)
        }
        Ok(ChartOutcome::Displayed) => {
            info!("> done");
            Ok(None)
        }
        Err(e) if e.is_rejection() => Ok(Some(e.to_string())),
        Err(e) => Err(e),
    }
}
