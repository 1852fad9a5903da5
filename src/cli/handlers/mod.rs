use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, data_io};
use crate::logging::{self, LogTarget};
use crate::model::config::Config;
use crate::model::Portfolio;
use crate::ops::filter::{self, PriorityFilter, ProjectFilter, StatusFilter, TaskStatusFilter};
use crate::ops::stats::portfolio_stats;

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Load config, install logging, and load the data set.
///
/// `--data` wins over `[data] path`; with neither, the built-in seed is used.
pub fn load_session(
    cli: &Cli,
    target: LogTarget,
) -> Result<(Config, Portfolio), Box<dyn std::error::Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    logging::init_logging(&config.log, target, cli.log.as_deref())?;

    let data_path = cli.data.as_deref().or(config.data.path.as_deref());
    let portfolio = data_io::load_portfolio(data_path)?;
    tracing::debug!(
        projects = portfolio.len(),
        custom_data = data_path.is_some(),
        "session loaded"
    );
    Ok((config, portfolio))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, portfolio) = load_session(&cli, LogTarget::Cli)?;
    let json = cli.json;

    match cli.command {
        None => Err("no subcommand given (run `docket` without arguments for the TUI)".into()),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&portfolio, args, json),
            Commands::Show(args) => cmd_show(&portfolio, args, json),
            Commands::Stats => cmd_stats(&portfolio, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    portfolio: &Portfolio,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = ProjectFilter {
        search: args.search.unwrap_or_default(),
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<PriorityFilter>)
            .transpose()?
            .unwrap_or_default(),
        status: args
            .status
            .as_deref()
            .map(str::parse::<StatusFilter>)
            .transpose()?
            .unwrap_or_default(),
    };
    let projects = filter::filter_projects(portfolio, &filter);

    if json {
        let results: Vec<_> = projects.iter().map(|p| project_summary_json(p)).collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if projects.is_empty() {
        println!("No projects found");
    } else {
        for project in &projects {
            println!("{}", format_project_line(project));
        }
    }
    Ok(())
}

fn cmd_show(
    portfolio: &Portfolio,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = portfolio
        .get(args.id)
        .ok_or_else(|| format!("project not found: {}", args.id))?;
    let status = args
        .status
        .as_deref()
        .map(str::parse::<TaskStatusFilter>)
        .transpose()?
        .unwrap_or_default();
    let tasks = filter::filter_tasks(project, status);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&project_detail_json(project, &tasks))?
        );
    } else {
        for line in format_project_detail(project, &tasks, status) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(portfolio: &Portfolio, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = portfolio_stats(portfolio);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&stats))?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}
