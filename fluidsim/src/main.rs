use fluidsim::{ScenarioConfig, Scenario, Scenario3D};
use fluidsim::{run_2d, run_3d, run_headless_2d, run_headless_3d};
use fluidsim::{bench_pressure_2d, bench_bottle_3d};

use bevy::app::AppExit;
use clap::Parser;
use anyhow::{anyhow, Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Brute-force particle fluid toy: 2D plane or 3D bottle")]
struct Args {
    /// Scenario file, looked up in `scenarios/` unless it is an existing path
    #[arg(short, long, default_value = "plane_2d.yaml")]
    file_name: String,

    /// Step this many frames without a window, log a summary and exit
    #[arg(long)]
    headless: Option<u64>,

    /// Run the timing benchmarks and exit
    #[arg(long)]
    bench: bool,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.is_file() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = scenario_path(&args.file_name);
    let mut scenario_cfg = ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    if args.seed.is_some() {
        scenario_cfg.engine.seed = args.seed;
    }

    Ok(scenario_cfg)
}

fn check_exit(exit: AppExit) -> Result<()> {
    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(anyhow!("simulation app exited with error code {code}")),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_pressure_2d();
        bench_bottle_3d();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;

    let exit = if !scenario_cfg.engine.dimension {
        let scenario = Scenario::build_scenario(&scenario_cfg)?;
        match args.headless {
            Some(frames) => run_headless_2d(scenario, frames),
            None => run_2d(scenario, &scenario_cfg.window),
        }
    }
    else {
        let scenario = Scenario3D::build_scenario_3d(&scenario_cfg)?;
        match args.headless {
            Some(frames) => run_headless_3d(scenario, frames),
            None => run_3d(scenario, &scenario_cfg.window),
        }
    };

    check_exit(exit)
}
