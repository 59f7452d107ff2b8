use planner_params::config::Config;
use planner_params::{build_request_args, InstanceStore, ParameterSource, ProfileRegistry, Resolver};
use serde_json::{json, Map, Value};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: planner-params [OPTIONS]

Prints the effective journey-planning parameters as JSON.

Options:
  --instance=KEY        Resolve parameters for this instance (defaults are
                        used, with a warning, for anything it leaves unset)
  --profile=NAME        Print the request arguments produced by applying this
                        traveler profile on top of the resolved parameters
  --list-profiles       Print every registered traveler profile
  --help                Show this help message"
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let registry = ProfileRegistry::new()?;

    if args.iter().any(|a| a == "--list-profiles") {
        let mut profiles = Map::new();
        for name in registry.names() {
            let profile = registry.lookup(name)?;
            profiles.insert(name.to_string(), serde_json::to_value(profile)?);
        }
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    let instance_key = args
        .iter()
        .find_map(|a| a.strip_prefix("--instance="))
        .unwrap_or("default");
    let profile_name = args.iter().find_map(|a| a.strip_prefix("--profile="));

    let store = InstanceStore::load(&config.instances_dir)?;
    let instance = store
        .get(instance_key)
        .map(|instance| &instance.parameters as &dyn ParameterSource);

    let resolver = Resolver::new(&config.defaults);
    let resolved = resolver.resolve_all(instance, instance_key);

    let output: Value = match profile_name {
        Some(name) => {
            let profile = registry.lookup(name)?;
            json!({
                "instance": instance_key,
                "profile": name,
                "request": build_request_args(resolved.iter(), profile),
            })
        }
        None => serde_json::to_value(&resolved)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
