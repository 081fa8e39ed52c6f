//! `look-back` command - generate look-back reports for a BGG user

use chrono::{Datelike, Local};
use console::style;
use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{cell_label, years_ago_label};
use crate::cli::GlobalOpts;
use crate::core::pipeline::{self, LookBackRequest, WrittenReport};
use crate::core::{BggClient, Config, PeriodSpec, ReportLayout};

#[derive(clap::Args, Debug, Clone)]
pub struct LookBackArgs {
    /// BoardGameGeek user name
    pub user: String,

    /// Month to look back from: a month number, "current" or "all" [default: current]
    #[arg(long, short = 'm')]
    pub month: Option<String>,

    /// Week to look back from: a week number, "current" or "all"
    #[arg(long, short = 'w')]
    pub week: Option<String>,

    /// Year to look back from [default: current year]
    #[arg(long, short = 'y')]
    pub year: Option<i32>,

    /// Directory to write the CSV reports to [default: out]
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Leave out the "YT Description" column
    #[arg(long)]
    pub no_description: bool,
}

impl LookBackArgs {
    /// Config layer holding the values given on the command line
    fn config_overrides(&self) -> Config {
        Config {
            output_dir: self.output_dir.clone(),
            include_description: self.no_description.then_some(false),
            ..Default::default()
        }
    }
}

pub fn run(args: LookBackArgs, global: &GlobalOpts) -> Result<()> {
    let mut config = Config::load();
    config.merge(args.config_overrides());

    let today = Local::now().date_naive();
    let request = LookBackRequest {
        username: args.user.clone(),
        reference_year: args.year.unwrap_or_else(|| today.year()),
        period: PeriodSpec {
            month: args.month.clone(),
            week: args.week.clone(),
        },
        output_dir: config.output_dir(),
        layout: ReportLayout {
            site_url: config.site_url().to_string(),
            include_description: config.include_description(),
        },
    };

    let client = BggClient::new(&config)?;
    let written = pipeline::run(&client, &request, today)?;

    if !global.quiet {
        print_summary(&request, &written);
    }
    Ok(())
}

fn print_summary(request: &LookBackRequest, written: &[WrittenReport]) {
    let total: usize = written.iter().map(|w| w.rows).sum();

    let mut table = Builder::default();
    table.push_record(["Look Back", "Period", "Videos", "File"]);
    for report in written {
        let file = report
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        table.push_record([
            years_ago_label(report.cell.years_ago()),
            cell_label(&report.cell),
            report.rows.to_string(),
            file,
        ]);
    }
    println!("{}", table.build().with(Style::rounded()));

    println!(
        "{} Wrote {} report{} with {} video{} to {}",
        style("✓").green(),
        style(written.len()).cyan(),
        if written.len() == 1 { "" } else { "s" },
        style(total).cyan(),
        if total == 1 { "" } else { "s" },
        style(request.output_dir.display()).dim()
    );
}
