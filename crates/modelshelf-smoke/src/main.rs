use modelshelf_smoke::harness::SCENARIO_PREFIX;
use modelshelf_smoke::{run_all, CallCounters, SCENARIOS};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut counters = CallCounters::new();
    let outcome = run_all(SCENARIOS, SCENARIO_PREFIX, &mut counters);

    println!();
    println!("loader calls:");
    print!("{}", counters);
    println!();

    match outcome {
        Ok(executed) => {
            println!("{} scenarios passed", executed);
            Ok(())
        }
        Err(failure) => {
            eprintln!("smoke run halted: {}", failure);
            std::process::exit(1);
        }
    }
}
