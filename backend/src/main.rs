use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use samplebank::BankAppState;
use shared::{ActivityRecord, Payee, StateChange};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  login <pin>                                 log in with a 5 digit PIN
  logout                                      log out and clear the draft
  accounts                                    list accounts with balances
  payees                                      list payees
  activity [account]                          show the activity log
  pay <payee#> <amount>                       pay a payee from the default account
  transfer <from#> <to#> <amount>             move money between accounts
  add-payee <account-number> <name...>        validate and add a payee
  edit-payee <payee#> <account-number> <name...>
  menu                                        toggle the side menu
  snapshot                                    print the full state as JSON
  help                                        show this text
  quit                                        exit";

const RECENT_ACTIVITY_LIMIT: usize = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut state = BankAppState::new();
    let mut events = state.subscribe();
    info!("SampleBank ready with {} accounts", state.accounts().len());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match run_command(&mut state, line.trim()) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => println!("error: {}", e),
                }
            }
            _ = ticker.tick() => {
                state.tick();
            }
        }
        print_events(&mut events);
    }

    info!("Shutting down");
    Ok(())
}

/// Returns Ok(false) when the session should end
fn run_command(state: &mut BankAppState, line: &str) -> Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("quit" | "exit", _) => return Ok(false),
        ("help", _) => println!("{}", HELP),
        ("login", [pin]) => {
            if state.login(pin) {
                println!("Logged in. Recent activity:");
                for record in state.recent_activities(RECENT_ACTIVITY_LIMIT) {
                    print_activity(state, &record);
                }
            } else {
                println!("Login failed");
            }
        }
        ("logout", []) => {
            state.logout();
            println!("Logged out");
        }
        ("accounts", []) => {
            for (i, account) in state.accounts().iter().enumerate() {
                println!(
                    "{}. {:<12} {:>14}  {}",
                    i + 1,
                    account.name,
                    state.currency().format(account.balance),
                    account.account_number
                );
            }
        }
        ("payees", []) => {
            for (i, payee) in state.payees().iter().enumerate() {
                println!("{}. [{}] {}  {}", i + 1, payee.initials, payee.name, payee.account_number);
            }
        }
        ("activity", rest) => {
            let records = if rest.is_empty() {
                state.activities()
            } else {
                state.activities_for_account(&rest.join(" "))
            };
            for record in records {
                print_activity(state, &record);
            }
        }
        ("pay", [payee, amount]) => {
            let payee = nth(&state.payees(), payee)?;
            let amount = state.currency().format_input(amount);
            state.prepare_payment(payee.id, amount);
            let succeeded = state.make_payment();
            report(state, succeeded);
        }
        ("transfer", [from, to, amount]) => {
            let accounts = state.accounts();
            let from = nth(&accounts, from)?.id;
            let to = nth(&accounts, to)?.id;
            let amount = state.currency().format_input(amount);
            state.prepare_transfer(from, to, amount);
            let succeeded = state.transfer_money();
            report(state, succeeded);
        }
        ("add-payee", [account_number, name @ ..]) if !name.is_empty() => {
            let name = name.join(" ");
            let validation = state.validate_new_payee(&name, account_number);
            if !validation.is_valid {
                bail!(validation.error_message.unwrap_or_default());
            }
            let payee = state.add_new_payee(&name, account_number)?;
            println!("Added {} ({})", payee.name, payee.initials);
        }
        ("edit-payee", [index, account_number, name @ ..]) if !name.is_empty() => {
            let existing = nth(&state.payees(), index)?;
            let edited = Payee {
                name: name.join(" "),
                account_number: account_number.to_string(),
                ..existing
            };
            if state.update_payee(&edited) {
                println!("Updated {}", edited.name);
            } else {
                warn!("Payee {} disappeared before update", edited.id);
                println!("Failed: payee {} could not be updated", edited.name);
            }
        }
        ("menu", []) => {
            state.toggle_menu();
            if state.show_menu() {
                for (label, _) in samplebank::app_state::MENU_ITEMS {
                    println!("  {}", label);
                }
            }
        }
        ("snapshot", []) => println!("{}", serde_json::to_string_pretty(&state.snapshot())?),
        _ => bail!("unrecognised command '{}', try 'help'", line),
    }
    Ok(true)
}

/// Pick a 1-based entry out of a printed list
fn nth<T: Clone>(items: &[T], position: &str) -> Result<T> {
    let index: usize = position
        .parse()
        .map_err(|_| anyhow!("'{}' is not a list number", position))?;
    index
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| anyhow!("no entry numbered {}", index))
}

fn print_activity(state: &BankAppState, record: &ActivityRecord) {
    let amount = record
        .amount
        .map(|a| state.currency().format(a))
        .unwrap_or_default();
    println!(
        "{}  {:<14} {:<32} {:>12}",
        record.date.format("%Y-%m-%d %H:%M"),
        record.title,
        record.description,
        amount
    );
}

fn report(state: &BankAppState, succeeded: bool) {
    if succeeded {
        println!("Done");
    } else if let Some(message) = state.error_message() {
        println!("Failed: {}", message);
    }
}

fn print_events(events: &mut broadcast::Receiver<StateChange>) {
    loop {
        match events.try_recv() {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => println!("  event {}", json),
                Err(e) => warn!("Could not serialize event: {}", e),
            },
            Err(TryRecvError::Lagged(skipped)) => warn!("Skipped {} events", skipped),
            Err(_) => break,
        }
    }
}
