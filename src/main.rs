use anyhow::{Context, Result, bail};
use average::Estimate;
use rand::prelude::*;
use sched_sim::{Discipline, Process, Schedule, scheduler::DEFAULT_QUANTUM, simulate};
use std::{env, fs, path::PathBuf, str::FromStr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Parameters for the random workload generator.
#[derive(Debug, Clone)]
struct WorkloadConfig {
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    max_priority: i64,
    seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 40,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 5,
            seed: 0,
        }
    }
}

#[derive(Debug)]
enum Workload {
    // One canonical process set per discipline
    Samples,
    Random(WorkloadConfig),
    File(PathBuf),
}

#[derive(Debug)]
struct Config {
    workload: Workload,
    quantum: u64,
}

impl Config {
    /// SCHED_SIM_WORKLOAD: `samples` (default), `random`, or a path to a JSON
    /// array of processes. SCHED_SIM_QUANTUM, SCHED_SIM_SEED and
    /// SCHED_SIM_TICKS tune the round robin quantum and the random generator.
    fn from_env() -> Result<Self> {
        let quantum = env_parse("SCHED_SIM_QUANTUM")?.unwrap_or(DEFAULT_QUANTUM);

        let workload = match env::var("SCHED_SIM_WORKLOAD").ok().as_deref() {
            None | Some("samples") => Workload::Samples,
            Some("random") => {
                let mut config = WorkloadConfig::default();
                if let Some(seed) = env_parse("SCHED_SIM_SEED")? {
                    config.seed = seed;
                }
                if let Some(ticks) = env_parse("SCHED_SIM_TICKS")? {
                    config.ticks = ticks;
                }
                Workload::Random(config)
            }
            Some(path) => Workload::File(PathBuf::from(path)),
        };

        Ok(Self { workload, quantum })
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .with_context(|| format!("{key}={raw:?} is not valid")),
        Err(_) => Ok(None),
    }
}

/// RUST_LOG picks the filter (default `info`); SCHED_SIM_LOG_JSON=1 switches
/// to JSON lines.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = env::var("SCHED_SIM_LOG_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).compact())
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    info!(?config, "starting scheduling simulation");

    let runs: Vec<(Discipline, Vec<Process>)> = match &config.workload {
        Workload::Samples => sample_workloads(config.quantum),
        Workload::Random(workload) => {
            let processes = bernoulli_processes(workload);
            info!(processes = processes.len(), "generated random workload");
            same_workload(processes, config.quantum)
        }
        Workload::File(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading workload {}", path.display()))?;
            let processes: Vec<Process> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing workload {}", path.display()))?;
            same_workload(processes, config.quantum)
        }
    };

    if runs.iter().all(|(_, processes)| processes.is_empty()) {
        bail!("workload is empty");
    }

    let mut summary = Vec::new();
    for (discipline, processes) in &runs {
        match simulate(processes, *discipline) {
            Ok(schedule) => {
                print_schedule(discipline, &schedule);
                if let Some(waiting) = schedule.average_waiting() {
                    summary.push(waiting);
                }
            }
            Err(err) => warn!(%discipline, %err, "simulation rejected"),
        }
    }

    if !summary.is_empty() {
        println!(
            "Mean of average waiting times across disciplines: {:.2}",
            avg(summary.into_iter())
        );
    }

    Ok(())
}

fn print_schedule(discipline: &Discipline, schedule: &Schedule) {
    println!("{discipline}");
    println!(
        "{:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5}",
        "PID", "AT", "BT", "PR", "ST", "CT", "TAT", "WT"
    );
    for r in &schedule.results {
        let priority = r.priority.map_or_else(|| "-".to_string(), |p| p.to_string());
        println!(
            "{:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5}",
            r.pid, r.arrival, r.burst, priority, r.start, r.completion, r.turnaround, r.waiting
        );
    }

    match schedule.averages() {
        Ok(averages) => {
            println!("Average Turnaround Time = {:.2}", averages.turnaround);
            println!("Average Waiting Time    = {:.2}", averages.waiting);
        }
        Err(err) => println!("Averages unavailable: {err}"),
    }
    println!(
        "Makespan = {} ticks, idle = {} ticks, longest idle period = {} ticks\n",
        schedule.makespan(),
        schedule.idle_time(),
        schedule.longest_idle()
    );
}

fn sample_workloads(quantum: u64) -> Vec<(Discipline, Vec<Process>)> {
    let fcfs = vec![
        Process::new(1, 0, 5),
        Process::new(2, 2, 3),
        Process::new(3, 4, 1),
        Process::new(4, 6, 2),
    ];
    let sjf = vec![
        Process::new(1, 0, 6),
        Process::new(2, 2, 2),
        Process::new(3, 5, 8),
        Process::new(4, 1, 3),
    ];
    let srtf = vec![
        Process::new(1, 0, 8),
        Process::new(2, 1, 4),
        Process::new(3, 2, 2),
        Process::new(4, 3, 1),
    ];
    let priority = vec![
        Process::with_priority(1, 0, 4, 2),
        Process::with_priority(2, 1, 3, 1),
        Process::with_priority(3, 2, 1, 3),
        Process::with_priority(4, 3, 5, 2),
    ];
    let round_robin = vec![
        Process::new(1, 0, 5),
        Process::new(2, 1, 3),
        Process::new(3, 2, 1),
        Process::new(4, 3, 2),
    ];

    Discipline::all(quantum)
        .into_iter()
        .zip([fcfs, sjf, srtf, priority, round_robin])
        .collect()
}

fn same_workload(processes: Vec<Process>, quantum: u64) -> Vec<(Discipline, Vec<Process>)> {
    Discipline::all(quantum)
        .into_iter()
        .map(|discipline| (discipline, processes.clone()))
        .collect()
}

fn bernoulli_processes(config: &WorkloadConfig) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut processes = Vec::new();

    for t in 0..config.ticks {
        if rng.random::<f64>() < config.p_arrival {
            let burst = if rng.random::<f64>() < config.p_short {
                config.short_ticks
            } else {
                config.long_ticks
            };
            let priority = rng.random_range(0..=config.max_priority);

            processes.push(Process::with_priority(
                processes.len() as u64 + 1,
                t,
                burst,
                priority,
            ));
        }
    }

    processes
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
