use std::env;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use localpros::billing::plans;
use localpros::config::{data_dir, load_or_default, AppConfig};
use localpros::logging::init_tracing;
use localpros::profiles::{LocalProfile, ProfileStore, SharedProfileStore};
use localpros::storage::FileSlotStorage;
use localpros::workflows::{OperationTracker, RegenerationOutcome, RegenerationWorkflow};

#[tokio::main]
async fn main() -> Result<()> {
    let command = Command::parse()?;
    let config = load_or_default()?;
    init_tracing(&config.logging);

    match command {
        Command::Plans => print_plans(),
        Command::List => {
            let store = open_store(&config)?;
            let store = store.lock();
            if store.is_empty() {
                println!("No profiles stored.");
            }
            for profile in store.list() {
                print_summary(profile);
            }
        }
        Command::Show(id) => {
            let store = open_store(&config)?;
            let profile = store
                .lock()
                .get(&id)
                .cloned()
                .ok_or_else(|| anyhow!("No profile with id {id}"))?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Delete(id) => {
            let store = open_store(&config)?;
            if store.lock().remove(&id)? {
                println!("Deleted profile {id}.");
            } else {
                println!("No profile with id {id}; nothing deleted.");
            }
        }
        Command::Regenerate(id) => {
            let store = open_store(&config)?;
            let workflow =
                RegenerationWorkflow::new(store, OperationTracker::new(), config.regeneration.delay());
            match workflow.execute(&id).await {
                RegenerationOutcome::Regenerated(profile) => {
                    println!("Regenerated bio for {}:", profile.full_name);
                    println!("{}", profile.bio_ai.unwrap_or_default());
                }
                RegenerationOutcome::NotFound => println!("No profile with id {id}."),
                RegenerationOutcome::Failed(message) => {
                    bail!("Regeneration failed for {id}: {message}")
                }
            }
        }
    }
    Ok(())
}

enum Command {
    List,
    Show(String),
    Delete(String),
    Regenerate(String),
    Plans,
}

impl Command {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let Some(command) = args.next() else {
            print_usage();
            std::process::exit(2);
        };
        let command = match command.as_str() {
            "list" => Self::List,
            "plans" => Self::Plans,
            "show" => Self::Show(args.next().context("Expected a profile id after `show`")?),
            "delete" => Self::Delete(args.next().context("Expected a profile id after `delete`")?),
            "regenerate" => {
                Self::Regenerate(args.next().context("Expected a profile id after `regenerate`")?)
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                return Err(anyhow!(
                    "Unknown command '{other}'. Run with --help for usage instructions."
                ));
            }
        };
        if let Some(extra) = args.next() {
            bail!("Unexpected argument '{extra}'.");
        }
        Ok(command)
    }
}

fn open_store(config: &AppConfig) -> Result<SharedProfileStore> {
    let storage = FileSlotStorage::new(data_dir(config)?);
    Ok(ProfileStore::load(Arc::new(storage), &config.storage.slot_name).into_shared())
}

fn print_summary(profile: &LocalProfile) {
    let available = profile
        .availability
        .iter()
        .filter(|slot| slot.available)
        .count();
    println!(
        "{}  {} ({}, {}) R{} [{}] {} slot(s) available",
        profile.id,
        profile.full_name,
        profile.skill,
        profile.location,
        profile.suggested_price_zar,
        profile.status,
        available
    );
}

fn print_plans() {
    for plan in plans() {
        println!(
            "{:<32} {:<24} {:>4} {} ({:?})",
            plan.price_id, plan.name, plan.price, plan.currency, plan.mode
        );
    }
}

fn print_usage() {
    println!("LocalPros profile store");
    println!("Usage: localpros <command> [id]");
    println!("Commands:");
    println!("  list              List stored profiles");
    println!("  show <id>         Print one profile as JSON");
    println!("  delete <id>       Delete a profile");
    println!("  regenerate <id>   Rebuild a profile bio from its fields");
    println!("  plans             List payment plans");
}
