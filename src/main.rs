mod config;
mod data_loader;
mod report;
mod standings;
mod store;
mod views;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use config::AppConfig;
use data_loader::DataSource;
use report::OutputFormat;
use standings::compute_standings;
use store::{DirStore, ObjectStore};
use views::{
    distinct_categories, distinct_teams, filter_by_category, group_bands, match_list,
    TeamSelection, ViewMode,
};

/// Selector label standing in for "no team filter".
const ALL_TEAMS: &str = "All teams";

#[derive(Parser)]
#[command(name = "liga-mt")]
#[command(about = "League tables and match results for the MT youth leagues", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "liga-config.json")]
    config: PathBuf,

    /// Override the result-file root directory from the config
    #[arg(long)]
    data_root: Option<String>,

    /// City to show; omit to list the supported cities
    #[arg(long)]
    city: Option<String>,

    /// Age category; omit to list the categories found for the city
    #[arg(long)]
    category: Option<String>,

    /// Restrict the match listing to one team. The league table always
    /// covers the whole category.
    #[arg(long)]
    team: Option<String>,

    /// What to render: table or results
    #[arg(long, default_value = "table")]
    view: ViewMode,

    /// Output format: plain or csv
    #[arg(long, default_value = "plain")]
    format: OutputFormat,

    /// Pick city, category, team and view interactively
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// One display cycle's worth of user choices.
struct Selection {
    city: String,
    category: Option<String>,
    team: TeamSelection,
    view: ViewMode,
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(root) = cli.data_root.clone() {
        config.data_root = root;
    }
    config.cities.sort();

    let store = DirStore::new(&config.data_root);
    let mut source = DataSource::new(
        store,
        config.namespace.clone(),
        Duration::from_secs(config.cache_ttl_secs),
    );

    if cli.interactive {
        return interactive_loop(&config, &mut source);
    }

    let Some(city) = cli.city.clone() else {
        println!("Supported cities:");
        for city in &config.cities {
            println!("  {city}");
        }
        println!("\nRun again with --city <name>.");
        return Ok(());
    };

    let selection = Selection {
        city,
        category: cli.category,
        team: match cli.team {
            Some(name) => TeamSelection::Team(name),
            None => TeamSelection::All,
        },
        view: cli.view,
        format: cli.format,
    };
    display_cycle(&config, &mut source, &selection)
}

/// Runs one display pass over freshly fetched or cached city data. Every
/// data problem ends the cycle with a notice; only rendering failures
/// propagate.
fn display_cycle<S: ObjectStore>(
    config: &AppConfig,
    source: &mut DataSource<S>,
    selection: &Selection,
) -> Result<()> {
    if !config.cities.contains(&selection.city) {
        println!(
            "Unknown city `{}`. Supported cities: {}",
            selection.city,
            config.cities.join(", ")
        );
        return Ok(());
    }

    let records = match source.city_matches(&selection.city) {
        Ok(records) => records,
        Err(err) => {
            log::error!("fetching {}: {err:#}", selection.city);
            println!("Could not load results for {}; try again later.", selection.city);
            return Ok(());
        }
    };
    if records.is_empty() {
        println!("No data available for the selected city.");
        return Ok(());
    }

    let categories = distinct_categories(&records);
    let Some(category) = &selection.category else {
        println!("Age categories for {}:", selection.city);
        for category in &categories {
            println!("  {category}");
        }
        println!("\nRun again with --category <name>.");
        return Ok(());
    };
    if !categories.contains(category) {
        println!(
            "No matches for category `{category}` in {}. Available: {}",
            selection.city,
            categories.join(", ")
        );
        return Ok(());
    }

    let in_category = filter_by_category(&records, category);

    if let TeamSelection::Team(name) = &selection.team {
        if !distinct_teams(&in_category).iter().any(|team| team == name) {
            println!("No matches for team `{name}` in {category}.");
            return Ok(());
        }
    }

    let rendered = match selection.view {
        // The table reflects the whole category; the team filter applies to
        // the match listing only.
        ViewMode::Table => {
            report::league_table(&compute_standings(&in_category), selection.format)?
        }
        ViewMode::Results => {
            let list = match_list(&in_category, &selection.team);
            let bands = selection.team.is_all().then(|| group_bands(&list));
            report::match_results(&list, bands.as_deref(), selection.format)?
        }
    };
    print!("{rendered}");
    Ok(())
}

/// Selector-driven loop standing in for the sidebar: pick a city, an age
/// category, a team and a view, render, repeat until the user stops.
/// Repeat visits inside the freshness window reuse the cached city data.
fn interactive_loop(config: &AppConfig, source: &mut DataSource<DirStore>) -> Result<()> {
    loop {
        let city_at = dialoguer::Select::new()
            .with_prompt("City")
            .items(&config.cities)
            .default(0)
            .interact()?;
        let city = config.cities[city_at].clone();

        let records = match source.city_matches(&city) {
            Ok(records) => records,
            Err(err) => {
                log::error!("fetching {city}: {err:#}");
                println!("Could not load results for {city}; try again later.");
                if !another_view()? {
                    return Ok(());
                }
                continue;
            }
        };
        if records.is_empty() {
            println!("No data available for the selected city.");
            if !another_view()? {
                return Ok(());
            }
            continue;
        }

        let categories = distinct_categories(&records);
        let category_at = dialoguer::Select::new()
            .with_prompt("Age category")
            .items(&categories)
            .default(0)
            .interact()?;
        let category = categories[category_at].clone();

        let in_category = filter_by_category(&records, &category);
        let mut teams = vec![ALL_TEAMS.to_string()];
        teams.extend(distinct_teams(&in_category));
        let team_at = dialoguer::Select::new()
            .with_prompt("Team")
            .items(&teams)
            .default(0)
            .interact()?;
        let team = if team_at == 0 {
            TeamSelection::All
        } else {
            TeamSelection::Team(teams[team_at].clone())
        };

        let view_at = dialoguer::Select::new()
            .with_prompt("View")
            .items(&["League table", "Match results"])
            .default(0)
            .interact()?;
        let view = if view_at == 0 {
            ViewMode::Table
        } else {
            ViewMode::Results
        };

        let selection = Selection {
            city,
            category: Some(category),
            team,
            view,
            format: OutputFormat::Plain,
        };
        display_cycle(config, source, &selection)?;

        if !another_view()? {
            return Ok(());
        }
    }
}

fn another_view() -> Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt("Show another view?")
        .default(true)
        .interact()?)
}
