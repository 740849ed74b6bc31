//! Effective configuration: file (or defaults) with command-line overrides.

use crate::adapter::inbound::cli::command::{DataArgs, LogArgs, OpportunitiesArgs, RunArgs};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Configuration for `arbscope run`.
pub fn resolve_run(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    apply_data(&mut config, &args.data);
    apply_log(&mut config, &args.log);

    if !args.symbols.is_empty() {
        config.data.symbols.clone_from(&args.symbols);
    }
    let backtest = &mut config.backtest;
    if let Some(commission) = args.commission {
        backtest.commission_pct = commission;
    }
    if let Some(model) = args.commission_model {
        backtest.commission_model = model.into();
    }
    if !args.thresholds.is_empty() {
        backtest.profit_thresholds.clone_from(&args.thresholds);
    }
    if let Some(balance) = args.initial_balance {
        backtest.initial_quote_balance = balance;
    }
    if let Some(ratio) = args.swap_ratio {
        backtest.swap_ratio = ratio;
    }
    if args.workers.is_some() {
        backtest.workers = args.workers;
    }

    config.finalize()?;
    Ok(config)
}

/// Configuration for `arbscope opportunities`, restricted to one symbol.
pub fn resolve_opportunities(args: &OpportunitiesArgs) -> Result<Config> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    apply_data(&mut config, &args.data);
    apply_log(&mut config, &args.log);

    config.data.symbols = vec![args.symbol.clone()];
    if let Some(commission) = args.commission {
        config.backtest.commission_pct = commission;
    }
    if let Some(model) = args.commission_model {
        config.backtest.commission_model = model.into();
    }

    config.finalize()?;
    Ok(config)
}

fn apply_data(config: &mut Config, data: &DataArgs) {
    if let Some(path) = &data.data {
        config.data.path.clone_from(path);
    }
    if !data.exchanges.is_empty() {
        config.data.exchanges.clone_from(&data.exchanges);
    }
    if data.start.is_some() {
        config.data.start.clone_from(&data.start);
    }
    if data.end.is_some() {
        config.data.end.clone_from(&data.end);
    }
}

fn apply_log(config: &mut Config, log: &LogArgs) {
    if let Some(level) = &log.log_level {
        config.logging.level.clone_from(level);
    }
    if log.json_logs {
        config.logging.format = "json".to_string();
    }
}
