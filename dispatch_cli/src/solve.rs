use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Args, ValueEnum};
use comfy_table::Table;
use dispatch_geo::{
    cache::{RouteCache, cache_folder_from_env},
    geo_estimator::{GeoEstimatorKind, OSRM_URL_ENV_VAR},
};
use dispatch_optimizer::{
    json::{solution::JsonDispatchSolution, types::JsonDispatchProblem},
    solver::{
        cost_model::sum_costs,
        dispatch_options::DispatchOptions,
        selector::AutoSelector,
        selector_params::{DEFAULT_CANDIDATE_BUDGET, SelectorParams},
        strategy::StrategyKind,
    },
};
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::parsers;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    Greedy,
    Unchained,
    Auto,
}

#[derive(Args)]
pub struct SolveArgs {
    /// Problem file with drivers and rides
    #[arg(short = 'i', long)]
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Budget of each candidate strategy (e.g., "5s", "PT1M")
    #[arg(short, long, value_parser = parsers::parse_positive_duration, default_value_t = DEFAULT_CANDIDATE_BUDGET)]
    budget: jiff::SignedDuration,

    #[arg(long)]
    include_deadhead_time: bool,

    #[arg(long)]
    include_deadhead_fuel: bool,

    /// Estimate travel with the OSRM service at $DISPATCH_OSRM_URL
    #[arg(long)]
    external_routing: bool,

    /// Where to write the solution as JSON
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl SolveArgs {
    fn selector_params(&self) -> SelectorParams {
        match self.strategy {
            StrategyArg::Greedy => SelectorParams::single(StrategyKind::Greedy, self.budget),
            StrategyArg::Unchained => SelectorParams::single(StrategyKind::Unchained, self.budget),
            StrategyArg::Auto => SelectorParams {
                candidate_budget: self.budget,
                ..SelectorParams::default()
            },
        }
    }

    /// Flags only switch options on, options from the file stay otherwise.
    fn apply_to(&self, options: &mut DispatchOptions) {
        options.include_deadhead_time |= self.include_deadhead_time;
        options.include_deadhead_fuel |= self.include_deadhead_fuel;
        options.use_external_routing |= self.external_routing;

        if let Ok(url) = std::env::var(OSRM_URL_ENV_VAR) {
            options.osrm_url = url;
        }
    }
}

pub async fn run(args: SolveArgs) -> anyhow::Result<()> {
    let file = File::open(&args.input)?;
    let mut content: JsonDispatchProblem = serde_json::from_reader(BufReader::new(file))?;

    let mut options = content.options.take().unwrap_or_default();
    args.apply_to(&mut options);
    options.validate()?;

    let problem = Arc::new(content.build_problem()?);
    info!(
        drivers = problem.num_drivers(),
        rides = problem.num_rides(),
        "Loaded {}",
        args.input.display()
    );

    let estimator_kind = options.estimator_kind();
    let cache_folder = cache_folder_from_env();
    let cache = Arc::new(load_cache(cache_folder.as_deref(), &estimator_kind));
    let estimator = estimator_kind.build(&Handle::current(), Arc::clone(&cache))?;

    let selector = AutoSelector::new(&args.selector_params());
    let result = selector
        .select(Arc::clone(&problem), Arc::new(options), estimator)
        .await?;

    if let Some(folder) = cache_folder.as_deref()
        && !cache.is_empty()
    {
        match cache.save_to_folder(folder, &estimator_kind) {
            Ok(path) => info!("Saved {} routes to {}", cache.len(), path.display()),
            Err(error) => warn!(%error, "Could not save the route cache"),
        }
    }

    let solution = JsonDispatchSolution::from_result(&result, &problem);
    println!("{}", summary_table(&solution)?);
    info!(
        "Finished: strategy = {}, served = {}/{}, cost = {}",
        solution.strategy,
        solution.served,
        problem.num_rides(),
        solution.total_cost
    );

    if let Some(out) = args.out {
        let mut writer = BufWriter::new(File::create(&out)?);
        serde_json::to_writer_pretty(&mut writer, &solution)?;
        writer.flush()?;
        info!("Wrote solution to {}", out.display());
    }

    Ok(())
}

fn load_cache(folder: Option<&Path>, kind: &GeoEstimatorKind) -> RouteCache {
    let Some(folder) = folder else {
        return RouteCache::new();
    };

    match RouteCache::load_from_folder(folder, kind) {
        Ok(Some(cache)) => {
            info!("Loaded {} cached routes", cache.len());
            cache
        }
        Ok(None) => RouteCache::new(),
        Err(error) => {
            warn!(%error, "Could not load the route cache");
            RouteCache::new()
        }
    }
}

fn summary_table(solution: &JsonDispatchSolution) -> anyhow::Result<Table> {
    let mut table = Table::new();
    table.set_header(vec!["Driver", "Rides", "Cost"]);

    for driver in &solution.drivers {
        let cost = sum_costs(
            solution
                .assignments
                .iter()
                .filter(|assignment| assignment.driver_id == driver.driver_id)
                .map(|assignment| assignment.total_cost),
        )?;

        table.add_row(vec![
            driver.driver_id.clone(),
            driver.ride_ids.join(", "),
            cost.to_string(),
        ]);
    }

    if !solution.unserved.is_empty() {
        table.add_row(vec![
            String::from("(unserved)"),
            solution.unserved.join(", "),
            String::new(),
        ]);
    }

    table.add_row(vec![
        String::from("Total"),
        format!("{} served", solution.served),
        solution.total_cost.to_string(),
    ]);

    Ok(table)
}
