use clap::Parser;
use readiness_gate::commands;
use readiness_gate::core::error::{GateError, print_error};
use readiness_gate::core::logging::init_logging;
use std::path::PathBuf;

/// Run launch readiness checks against an environment and gate the release on the verdict
#[derive(Parser)]
#[command(name = "readiness-gate")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct GateCli {
  /// Target environment (default: gate.default_environment, or "staging")
  environment: Option<String>,

  /// Config file (default: gate.toml, .gate.toml or .config/gate.toml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Output results in JSON format
  #[arg(long)]
  json: bool,

  /// List registered checks without running them
  #[arg(long)]
  list: bool,

  /// Increase diagnostic output on stderr (repeatable)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = GateCli::parse();
  init_logging(cli.verbose);

  let result = if cli.list {
    commands::run_list(cli.environment, cli.config, cli.json)
  } else {
    commands::run_gate(cli.environment, cli.config, cli.json)
  };

  match result {
    Ok(code) => std::process::exit(code.as_i32()),
    Err(err) => handle_error(err),
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
