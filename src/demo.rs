//! Named samples behind one dispatch point.
//!
//! Each sample builds its output as lines so tests can pin the exact text;
//! [`run`] prints the lines and mirrors them to the run log when one is
//! active.

use crate::bank::{transfer, usd, Account, Checking, Savings};
use crate::config::DemoConfig;
use crate::list::LinkedList;
use crate::queue::Queue;
use crate::roster::{Admin, Person, Roster};
use crate::runlog::RunLog;
use anyhow::{bail, Result};

/// Sample run when none is named.
pub const DEFAULT_DEMO: &str = "roster";

/// Every registered sample, in menu order: (name, blurb).
pub fn catalog() -> Vec<(&'static str, &'static str)> {
    vec![
        ("roster", "introductions across a mixed member roster"),
        (
            "banking",
            "a month of savings and checking activity over one account capability",
        ),
        ("structures", "a queue and a linked list doing their thing"),
    ]
}

/// Build the output lines for a sample by name.
pub fn script(name: &str, config: &DemoConfig) -> Option<Vec<String>> {
    match name {
        "roster" => Some(roster_script(config)),
        "banking" => Some(banking_script(config)),
        "structures" => Some(structures_script()),
        _ => None,
    }
}

/// Run a sample by name: print every line, mirroring them to the run log
/// when one is active.
pub fn run(name: &str, config: &DemoConfig, mut log: Option<&mut RunLog>) -> Result<()> {
    let lines = match script(name, config) {
        Some(lines) => lines,
        None => {
            let names: Vec<&str> = catalog().iter().map(|(name, _)| *name).collect();
            bail!("Unknown sample '{}' (available: {})", name, names.join(", "));
        }
    };

    if let Some(log) = log.as_mut() {
        log.demo_start(name)?;
    }
    for line in &lines {
        println!("{}", line);
        if let Some(log) = log.as_mut() {
            log.demo_line(name, line)?;
        }
    }
    if let Some(log) = log.as_mut() {
        log.demo_end(name, lines.len())?;
    }
    Ok(())
}

/// Two members, one capability: the member behind each slot decides how it
/// introduces itself.
fn roster_script(config: &DemoConfig) -> Vec<String> {
    let seeds = &config.roster;

    let mut roster = Roster::new();
    roster.add(Box::new(Person::new(
        seeds.person.name.clone(),
        seeds.person.age,
    )));
    roster.add(Box::new(Admin::new(
        seeds.admin.name.clone(),
        seeds.admin.age,
        seeds.admin.privileges.clone(),
    )));

    roster.introductions()
}

/// One month of account activity: opening, a check, a transfer, the
/// withdrawal cap, overdraft room, and month-end processing for both
/// accounts through the shared trait.
fn banking_script(config: &DemoConfig) -> Vec<String> {
    let seeds = &config.bank;
    let mut lines = Vec::new();

    let mut savings = Savings::open(
        seeds.savings.holder.clone(),
        seeds.savings.number.clone(),
        seeds.savings.opening_deposit,
        seeds.savings.interest_rate,
    );
    let mut checking = Checking::open(
        seeds.checking.holder.clone(),
        seeds.checking.number.clone(),
        seeds.checking.opening_deposit,
        seeds.checking.overdraft_limit,
    );

    lines.push("===== BANKING SYSTEM DEMO =====".to_string());

    lines.push("--- Initial Setup ---".to_string());
    lines.push(savings.summary());
    lines.push(checking.summary());

    lines.push("--- Transactions ---".to_string());
    match savings.deposit(500.0) {
        Ok(balance) => lines.push(format!(
            "Deposited {}. New balance: {}",
            usd(500.0),
            usd(balance)
        )),
        Err(err) => lines.push(err.to_string()),
    }
    lines.push(format!(
        "Writing check to Electric Company for {}",
        usd(150.0)
    ));
    match checking.write_check("Electric Company", 150.0) {
        Ok(balance) => lines.push(format!(
            "Withdrew {}. New balance: {}",
            usd(150.0),
            usd(balance)
        )),
        Err(err) => lines.push(err.to_string()),
    }

    lines.push("--- Transfer Between Accounts ---".to_string());
    lines.push(format!(
        "Transferring {} from {} to {}",
        usd(300.0),
        savings.holder(),
        checking.holder()
    ));
    match transfer(&mut savings, &mut checking, 300.0) {
        Ok(()) => {
            lines.push(savings.summary());
            lines.push(checking.summary());
        }
        Err(err) => lines.push(err.to_string()),
    }

    lines.push("--- Withdrawal Limit Test (Savings) ---".to_string());
    for attempt in 1..=7 {
        lines.push(format!("Withdrawal attempt {}:", attempt));
        match savings.withdraw(50.0) {
            Ok(balance) => lines.push(format!(
                "Withdrew {}. New balance: {}",
                usd(50.0),
                usd(balance)
            )),
            Err(err) => lines.push(err.to_string()),
        }
    }

    lines.push("--- Overdraft Test (Checking) ---".to_string());
    match checking.withdraw(600.0) {
        Ok(balance) => {
            lines.push(format!(
                "Withdrew {}. New balance: {}",
                usd(600.0),
                usd(balance)
            ));
            if checking.overdraft_in_use() > 0.0 {
                lines.push(format!(
                    "Using {} overdraft protection",
                    usd(checking.overdraft_in_use())
                ));
            }
        }
        Err(err) => lines.push(err.to_string()),
    }

    lines.extend(month_end(&mut savings));
    lines.extend(month_end(&mut checking));

    lines.push("--- Transaction History ---".to_string());
    lines.push(format!(
        "{}'s transactions: {} transactions",
        savings.holder(),
        savings.history().len()
    ));

    lines
}

/// Month-end for any account: charge or waive the fee, then let the
/// variant do its own closing work.
fn month_end(account: &mut dyn Account) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "--- Processing monthly maintenance for {} ---",
        account.holder()
    ));

    let fee = account.monthly_fee();
    if fee > 0.0 {
        match account.withdraw(fee) {
            Ok(_) => lines.push(format!("Monthly fee charged: {}", usd(fee))),
            Err(err) => lines.push(format!("Monthly fee {} not charged: {}", usd(fee), err)),
        }
    } else {
        lines.push("Monthly fee waived".to_string());
    }

    if let Some(interest) = account.close_month() {
        lines.push(format!("Interest applied: {}", usd(interest)));
    }

    lines.push(account.summary());
    lines
}

fn structures_script() -> Vec<String> {
    let mut lines = Vec::new();

    let mut queue = Queue::new();
    queue.enqueue(1);
    queue.enqueue(2);
    if let Some(item) = queue.dequeue() {
        lines.push(item.to_string());
    }

    let mut list = LinkedList::new();
    list.push_front(10);
    list.push_front(20);
    for value in list.iter() {
        lines.push(value.to_string());
    }

    lines
}
