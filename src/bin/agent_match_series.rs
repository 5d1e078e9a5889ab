//! Standalone agent-vs-agent series runner.
//!
//! Run with:
//! `cargo run --release --bin agent_match_series`
//! `cargo run --release --bin agent_match_series -- --light minimax:3 --dark random --games 20`

use regicide::arena::series::{agent_from_name, play_match_series, SeriesConfig};

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut light_name = "minimax:2".to_owned();
    let mut dark_name = "random".to_owned();
    let mut config = SeriesConfig::default();

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--verbose" | "-v" => {
                config.verbose = true;
                index += 1;
            }
            flag @ ("--light" | "--dark" | "--games" | "--concurrency" | "--max-plies") => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| format!("{flag} needs a value"))?;
                match flag {
                    "--light" => light_name = value.clone(),
                    "--dark" => dark_name = value.clone(),
                    "--games" => config.games = parse(flag, value)?,
                    "--concurrency" => config.concurrency = parse(flag, value)?,
                    "--max-plies" => config.max_plies = parse(flag, value)?,
                    _ => unreachable!(),
                }
                index += 2;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    // Validate both names before spending any time on matches.
    agent_from_name(&light_name).map_err(|e| e.to_string())?;
    agent_from_name(&dark_name).map_err(|e| e.to_string())?;

    println!(
        "series: {} (light) vs {} (dark), {} games, {} in flight, {} plies max",
        light_name, dark_name, config.games, config.concurrency, config.max_plies
    );

    let stats = play_match_series(
        || agent_from_name(&light_name).unwrap_or_else(|_| unreachable!("validated above")),
        || agent_from_name(&dark_name).unwrap_or_else(|_| unreachable!("validated above")),
        config,
    )
    .map_err(|e| e.to_string())?;

    println!("{}", stats.report());
    Ok(())
}

fn parse<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("{flag} needs a number, got {value:?}"))
}
