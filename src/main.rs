//! `trackview` binary: open a viewer window, optionally replaying recorded
//! tracks.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use trackview::{Options, ViewCommand, Viewer};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "trackview",
    about = "Perspective and axis-locked orthographic views of a simulation volume",
    version
)]
struct Cli {
    /// Recorded tracks to replay (JSON).
    trajectory: Option<PathBuf>,

    /// Options preset (TOML).
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// View to open in: `perspective`, `ortho-x`, `ortho-y` or `ortho-z`.
    #[arg(long, value_name = "NAME", value_parser = ViewCommand::from_str)]
    view: Option<ViewCommand>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let options = match cli.options.as_deref().map(Options::load) {
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log::error!("{e}");
            std::process::exit(1);
        }
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    if let Some(path) = cli.trajectory {
        builder = builder.with_trajectory(path);
    }
    if let Some(view) = cli.view {
        builder = builder.with_initial_view(view);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use trackview::PrincipalAxis;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let argv = std::iter::once("trackview").chain(args.iter().copied());
        Cli::try_parse_from(argv)
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positional_and_flags() {
        let cli =
            parse(&["run.json", "--view", "ortho-z", "--options", "o.toml"])
                .unwrap();
        assert_eq!(cli.trajectory, Some(PathBuf::from("run.json")));
        assert_eq!(cli.options, Some(PathBuf::from("o.toml")));
        assert_eq!(
            cli.view,
            Some(ViewCommand::ToOrthographic(PrincipalAxis::Z))
        );
    }

    #[test]
    fn everything_is_optional() {
        let cli = parse(&[]).unwrap();
        assert!(cli.trajectory.is_none());
        assert!(cli.options.is_none());
        assert!(cli.view.is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--view"]).is_err());
        assert!(parse(&["--view", "sideways"]).is_err());
        assert!(parse(&["--fast"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
    }
}
