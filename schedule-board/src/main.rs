use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use schedule_board::board::{HighlightConfig, NearestPolicy, RouteGroups, ScrollTarget};
use schedule_board::cache::{CacheConfig, CachedScheduleSource};
use schedule_board::clock::SystemClock;
use schedule_board::domain::{DayBucket, DepartureRecord, DirectionRef};
use schedule_board::feed::{
    DEFAULT_FEED_URL, FileScheduleSource, ScheduleClient, ScheduleClientConfig, ScheduleSource,
};
use schedule_board::preferences::{PreferenceStore, Preferences};
use schedule_board::repository::{LoadStatus, ScheduleRepository};
use schedule_board::session::BoardSession;

/// Where preferences live unless `SCHEDULE_PREFS` says otherwise.
const DEFAULT_PREFS_PATH: &str = "schedule_board_prefs.json";

/// How often to check for a weekday rollover.
const ROLLOVER_CHECK_INTERVAL: Duration = Duration::from_secs(60);

const NO_DEPARTURES: &str = "No hay horarios cargados para este día.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let store = PreferenceStore::new(
        std::env::var("SCHEDULE_PREFS").unwrap_or_else(|_| DEFAULT_PREFS_PATH.to_string()),
    );
    let preferences = match std::env::var("SCHEDULE_DARK_MODE") {
        Ok(value) => store.set_dark_mode(parse_flag(&value))?,
        Err(_) => store.load(),
    };

    let mut config = HighlightConfig::default();
    if let Ok(secs) = std::env::var("SCHEDULE_TICK_SECS") {
        config = config.with_tick(Duration::from_secs(secs.parse()?));
    }
    if let Ok(policy) = std::env::var("SCHEDULE_POLICY") {
        config = config.with_policy(policy.parse::<NearestPolicy>()?);
    }

    // A local file wins over the network feed
    match std::env::var("SCHEDULE_FILE") {
        Ok(path) => run(FileScheduleSource::new(path), config, preferences).await,
        Err(_) => {
            let url = std::env::var("SCHEDULE_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
            let client = ScheduleClient::new(ScheduleClientConfig::new(url))?;
            let cached = CachedScheduleSource::new(client, &CacheConfig::default());
            run(cached, config, preferences).await
        }
    }
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

async fn run<S: ScheduleSource>(
    source: S,
    config: HighlightConfig,
    preferences: Preferences,
) -> Result<(), Box<dyn Error>> {
    info!(source = source.name(), "loading schedule");
    let repository = ScheduleRepository::load(&source).await;
    if let LoadStatus::Failed(reason) = repository.status().await {
        println!("No se cargaron horarios: {reason}");
    }

    let mut session = BoardSession::new(repository, Arc::new(SystemClock), config);
    if let Ok(day) = std::env::var("SCHEDULE_DAY") {
        session.set_day(day.parse::<DayBucket>()?);
    }

    print_heading(&session.groups().await, session.day());

    let Some(direction) = std::env::var("SCHEDULE_DIRECTION")
        .ok()
        .and_then(|raw| DirectionRef::parse(&raw))
    else {
        return Ok(());
    };

    if let Ok(stop) = std::env::var("SCHEDULE_STOP") {
        session.set_stop_filter(&stop).await;
    }
    session.select_direction(&direction).await?;

    let mut scroll = session.scroll_target();
    print_board(&session, &mut scroll, preferences.dark_mode).await;

    let mut rollover = tokio::time::interval(ROLLOVER_CHECK_INTERVAL);
    rollover.tick().await; // First tick is immediate, skip it

    loop {
        tokio::select! {
            changed = scroll.changed() => {
                if changed.is_err() {
                    break;
                }
                print_board(&session, &mut scroll, preferences.dark_mode).await;
            }
            _ = rollover.tick() => {
                if session.sync_automatic_day() {
                    print_heading(&session.groups().await, session.day());
                    // Keep following the same variant if the new day runs it
                    if let Err(e) = session.select_direction(&direction).await {
                        info!(error = %e, "configured direction not running today");
                        print_board(&session, &mut scroll, preferences.dark_mode).await;
                    }
                }
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "failed to listen for ctrl-c");
                }
                break;
            }
        }
    }

    session.deselect();
    Ok(())
}

fn print_heading(groups: &RouteGroups, day: DayBucket) {
    println!("{}", day.display_name());
    println!();
    if groups.is_empty() {
        println!("{NO_DEPARTURES}");
        return;
    }
    for group in groups {
        println!("Recorridos {}", group.base.title());
        for variant in &group.variants {
            println!("  [{}] {}", variant.direction().label(), variant);
        }
    }
    println!();
}

async fn print_board(
    session: &BoardSession,
    scroll: &mut watch::Receiver<ScrollTarget>,
    dark_mode: bool,
) {
    let target = scroll.borrow_and_update().clone();
    let departures = session.visible_departures().await;

    if let Some(direction) = session.selected() {
        println!("{} - {}", direction, session.day().display_name());
    }
    if departures.is_empty() {
        println!("{NO_DEPARTURES}");
        return;
    }
    for departure in &departures {
        let emphasised = target.as_deref() == Some(departure.label.as_str());
        println!("{}", render_line(departure, emphasised, dark_mode));
    }
    println!();
}

fn render_line(departure: &DepartureRecord, emphasised: bool, dark_mode: bool) -> String {
    let line = format!("{:>5}  {}", departure.label, departure.route_summary());
    match (emphasised, dark_mode) {
        (false, _) => format!("   {line}"),
        (true, true) => format!(" > \x1b[1;33m{line}\x1b[0m"),
        (true, false) => format!(" > \x1b[1;7m{line}\x1b[0m"),
    }
}
