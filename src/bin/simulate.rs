use chrono::{SecondsFormat, Utc};
use clap::Parser;
use packman_pursuit::constants::{STARTING_LIVES, TOTAL_ITEMS};
use packman_pursuit::engine::GameEngine;
use packman_pursuit::maze::TileMap;
use packman_pursuit::rng::Rng;
use packman_pursuit::types::{Command, Direction, GameMode, GhostMode, RuntimeEvent, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Ten minutes of play at the fixed tick rate.
const DEFAULT_TICK_LIMIT: u64 = 36_000;
const AUTOPILOT_SEED_SALT: u32 = 0x9e37_79b9;

// Region penned and departing agents must stay inside, in tiles.
const PEN_REGION_X: (f32, f32) = (11.0, 16.0);
const PEN_REGION_Y: (f32, f32) = (14.0, 19.0);

/// Runs autopiloted games headlessly and reports invariant violations.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Seed of the first run; later runs use consecutive seeds.
    #[arg(long)]
    seed: Option<u32>,
    /// Tick budget per run.
    #[arg(long, default_value_t = DEFAULT_TICK_LIMIT)]
    ticks: u64,
    #[arg(long, default_value_t = 1)]
    runs: u32,
    #[arg(long)]
    match_id: Option<String>,
    /// Where to write the pretty-printed run summary.
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug)]
struct Scenario {
    name: String,
    seed: u32,
    tick_limit: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
enum FinishReason {
    GameOver,
    TickLimit,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tally {
    items_eaten: u32,
    captures: u32,
    deaths: u32,
    levels_cleared: u32,
    extra_life: bool,
}

impl Tally {
    fn count(&mut self, event: &RuntimeEvent) {
        match event {
            RuntimeEvent::ItemEaten { .. } | RuntimeEvent::PowerItemEaten { .. } => {
                self.items_eaten += 1
            }
            RuntimeEvent::GhostCaptured { .. } => self.captures += 1,
            RuntimeEvent::PlayerCaught { .. } => self.deaths += 1,
            RuntimeEvent::LevelCleared { .. } => self.levels_cleared += 1,
            RuntimeEvent::ExtraLife { .. } => self.extra_life = true,
            _ => {}
        }
    }
}

/// One JSON line on stdout per finished run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutcome {
    scenario: String,
    seed: u32,
    reason: FinishReason,
    score: u32,
    level: u32,
    lives: u32,
    ticks: u64,
    #[serde(flatten)]
    tally: Tally,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

/// Every occurrence is kept for logging; the outcome lists each message once.
#[derive(Debug, Default)]
struct AnomalyLog {
    records: Vec<AnomalyRecord>,
    seen: HashSet<String>,
    distinct: Vec<String>,
}

impl AnomalyLog {
    fn record(&mut self, tick: u64, message: String) {
        if self.seen.insert(message.clone()) {
            self.distinct.push(message.clone());
        }
        self.records.push(AnomalyRecord { tick, message });
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    match_id: String,
    generated_at: String,
    scenario_count: usize,
    anomaly_count: usize,
    average_score: u32,
    reason_counts: BTreeMap<FinishReason, usize>,
    scenarios: Vec<RunOutcome>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogLine<'a> {
    timestamp_ms: u64,
    level: &'a str,
    event: &'a str,
    match_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

/// Structured stderr logger bound to one match id.
struct Logger {
    match_id: String,
}

impl Logger {
    fn run(&self, level: &str, event: &str, details: Value) {
        self.write(level, event, None, None, details);
    }

    fn scenario(&self, level: &str, event: &str, scenario: &Scenario, tick: Option<u64>, details: Value) {
        self.write(level, event, Some(scenario), tick, details);
    }

    fn write(
        &self,
        level: &str,
        event: &str,
        scenario: Option<&Scenario>,
        tick: Option<u64>,
        details: Value,
    ) {
        let line = LogLine {
            timestamp_ms: now_ms(),
            level,
            event,
            match_id: &self.match_id,
            scenario: scenario.map(|s| s.name.as_str()),
            seed: scenario.map(|s| s.seed),
            tick,
            details,
        };
        match serde_json::to_string(&line) {
            Ok(text) => eprintln!("{text}"),
            Err(error) => eprintln!("[simulate] unloggable {event}: {error}"),
        }
    }
}

/// Random-walk driver: picks a passable direction at junctions and walls.
struct Autopilot {
    rng: Rng,
}

impl Autopilot {
    fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed ^ AUTOPILOT_SEED_SALT),
        }
    }

    fn choose(&mut self, engine: &GameEngine) -> Option<Direction> {
        let player = engine.player();
        if !player.position().is_centered() {
            return None;
        }
        let (x, y) = player.tile();
        let maze = engine.maze();
        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| {
                let (nx, ny) = dir.offset(x, y, 1);
                !maze.is_blocked_at(nx, ny)
            })
            .collect();
        let facing = player.facing();
        let onward: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|dir| *dir != facing.opposite())
            .collect();
        if onward.len() == 1 && onward[0] == facing {
            return None;
        }
        if onward.is_empty() {
            self.rng.pick(&open)
        } else {
            self.rng.pick(&onward)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let scenarios = resolve_scenarios(&cli);
    let first_seed = scenarios.first().map_or(0, |scenario| scenario.seed);
    let logger = Logger {
        match_id: cli
            .match_id
            .clone()
            .unwrap_or_else(|| format!("sim-{first_seed}-{}", now_ms())),
    };

    let mut outcomes = Vec::with_capacity(scenarios.len());
    let mut anomaly_count = 0;
    for scenario in &scenarios {
        logger.scenario(
            "info",
            "scenario_started",
            scenario,
            None,
            json!({ "tickLimit": scenario.tick_limit }),
        );
        let (outcome, log) = run_scenario(scenario);
        for record in &log.records {
            logger.scenario(
                "warn",
                "anomaly_detected",
                scenario,
                Some(record.tick),
                json!({ "message": record.message }),
            );
        }
        anomaly_count += log.records.len();
        logger.scenario(
            "info",
            "scenario_finished",
            scenario,
            Some(outcome.ticks),
            json!({
                "reason": outcome.reason,
                "score": outcome.score,
                "level": outcome.level,
                "anomalyCount": log.records.len(),
            }),
        );
        match serde_json::to_string(&outcome) {
            Ok(line) => println!("{line}"),
            Err(error) => eprintln!("[simulate] cannot serialize {}: {error}", outcome.scenario),
        }
        outcomes.push(outcome);
    }

    let summary = summarize(logger.match_id.clone(), outcomes, anomaly_count);
    if let Some(path) = &cli.summary_out {
        if let Err(error) = write_summary(path, &summary) {
            logger.run(
                "error",
                "summary_write_failed",
                json!({ "path": path.display().to_string(), "error": error.to_string() }),
            );
            std::process::exit(2);
        }
    }
    logger.run(
        "info",
        "run_finished",
        json!({
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "averageScore": summary.average_score,
            "reasonCounts": summary.reason_counts,
            "summaryOut": cli.summary_out.as_ref().map(|path| path.display().to_string()),
        }),
    );

    if summary.anomaly_count > 0 {
        std::process::exit(1);
    }
}

fn run_scenario(scenario: &Scenario) -> (RunOutcome, AnomalyLog) {
    let mut engine = GameEngine::new(scenario.seed);
    let mut autopilot = Autopilot::new(scenario.seed);
    let mut tally = Tally::default();
    let mut log = AnomalyLog::default();
    let mut previous_score = 0;
    let mut elapsed = 0;

    while elapsed < scenario.tick_limit && engine.mode() != GameMode::GameOver {
        if engine.mode() == GameMode::Playing {
            if let Some(dir) = autopilot.choose(&engine) {
                engine.receive_command(Command::Turn(dir));
            }
        }
        engine.step();
        elapsed += 1;

        let snapshot = engine.build_snapshot(true);
        for message in snapshot_anomalies(&snapshot, previous_score) {
            log.record(elapsed, message);
        }
        previous_score = snapshot.score;
        snapshot.events.iter().for_each(|event| tally.count(event));
    }

    let reason = if engine.mode() == GameMode::GameOver {
        FinishReason::GameOver
    } else {
        FinishReason::TickLimit
    };
    let state = engine.state();
    let outcome = RunOutcome {
        scenario: scenario.name.clone(),
        seed: scenario.seed,
        reason,
        score: state.score,
        level: state.level,
        lives: state.lives,
        ticks: elapsed,
        tally,
        anomalies: log.distinct.clone(),
    };
    (outcome, log)
}

fn snapshot_anomalies(snapshot: &Snapshot, previous_score: u32) -> Vec<String> {
    let mut found = Vec::new();
    if snapshot.score < previous_score {
        found.push(format!(
            "score decreased: {previous_score} -> {}",
            snapshot.score
        ));
    }
    if snapshot.lives > STARTING_LIVES + 1 {
        found.push(format!("lives out of range: {}", snapshot.lives));
    }
    if snapshot.items_left > TOTAL_ITEMS {
        found.push(format!("items left out of range: {}", snapshot.items_left));
    }

    for ghost in &snapshot.ghosts {
        if ghost.speed_percent <= 0 {
            found.push(format!(
                "non-positive speed: {:?} {}",
                ghost.color, ghost.speed_percent
            ));
        }
        let confined = matches!(ghost.mode, GhostMode::Penned | GhostMode::Departing);
        let inside = (PEN_REGION_X.0..=PEN_REGION_X.1).contains(&ghost.x)
            && (PEN_REGION_Y.0..=PEN_REGION_Y.1).contains(&ghost.y);
        if confined && !inside {
            found.push(format!(
                "{:?} left the pen region while {:?}",
                ghost.color, ghost.mode
            ));
        }
    }
    found
}

fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
    let seed = cli.seed.unwrap_or_else(rand::random::<u32>);
    (0..cli.runs.max(1))
        .map(|idx| Scenario {
            name: format!("run-{}", idx + 1),
            seed: seed.wrapping_add(idx),
            tick_limit: cli.ticks,
        })
        .collect()
}

fn summarize(match_id: String, scenarios: Vec<RunOutcome>, anomaly_count: usize) -> RunSummary {
    let mut reason_counts = BTreeMap::new();
    for outcome in &scenarios {
        *reason_counts.entry(outcome.reason).or_insert(0) += 1;
    }
    let total_score: u64 = scenarios.iter().map(|outcome| u64::from(outcome.score)).sum();
    let average_score = total_score
        .checked_div(scenarios.len() as u64)
        .unwrap_or(0) as u32;
    RunSummary {
        match_id,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        scenario_count: scenarios.len(),
        anomaly_count,
        average_score,
        reason_counts,
        scenarios,
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, text)
}
