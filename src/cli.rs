//! Interactive playground over a live roster.
//!
//! Commands are plain words tokenized with `shell-words`, so quoted names
//! with spaces survive intact. Mutating commands go through the shared
//! member capability, which is what makes `rename` and `age` work the same
//! on any member.

use crate::config::DemoConfig;
use crate::demo;
use crate::roster::{Admin, Person, Roster};
use crate::runlog::RunLog;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub struct Context {
    pub config: DemoConfig,
    pub roster: Roster,
    pub log: Option<RunLog>,
}

pub fn run_repl(mut ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("kata playground - type 'help' for commands, 'exit' to quit");

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                if let Some(log) = ctx.log.as_mut() {
                    if let Err(e) = log.repl_command(line) {
                        eprintln!("Warning: failed to log command: {}", e);
                    }
                }

                match handle_command(&mut ctx, line) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Dispatch one line of input. Returns true when the loop should end.
fn handle_command(ctx: &mut Context, line: &str) -> Result<bool> {
    let words = shell_words::split(line)?;
    if words.is_empty() {
        return Ok(false);
    }
    let args = &words[1..];

    match words[0].as_str() {
        "exit" | "quit" => return Ok(true),
        "help" => print_help(),
        "person" => cmd_person(ctx, args),
        "admin" => cmd_admin(ctx, args),
        "intro" => cmd_intro(ctx),
        "list" => cmd_list(ctx),
        "rename" => cmd_rename(ctx, args),
        "age" => cmd_age(ctx, args),
        "demo" => cmd_demo(ctx, args)?,
        _ => println!("Unknown command: {} (try 'help')", words[0]),
    }
    Ok(false)
}

fn print_help() {
    println!("Commands:");
    println!("  person <name> <age>             - add a person to the roster");
    println!("  admin <name> <age> [p1,p2,...]  - add an admin with privileges");
    println!("  intro                           - everyone introduces themselves");
    println!("  list                            - show the roster with indices");
    println!("  rename <index> <name>           - change a member's name");
    println!("  age <index> <years>             - change a member's age");
    println!("  demo <name>                     - run a named sample");
    println!("  help                            - show commands");
    println!("  exit                            - quit");
}

fn cmd_person(ctx: &mut Context, args: &[String]) {
    if args.len() != 2 {
        println!("Usage: person <name> <age>");
        return;
    }
    let age = match args[1].parse::<u32>() {
        Ok(age) => age,
        Err(_) => {
            println!("Invalid age: {}", args[1]);
            return;
        }
    };

    let index = ctx.roster.add(Box::new(Person::new(args[0].clone(), age)));
    println!("[{}] added {}", index, args[0]);
}

fn cmd_admin(ctx: &mut Context, args: &[String]) {
    if args.len() < 2 || args.len() > 3 {
        println!("Usage: admin <name> <age> [privilege,privilege,...]");
        return;
    }
    let age = match args[1].parse::<u32>() {
        Ok(age) => age,
        Err(_) => {
            println!("Invalid age: {}", args[1]);
            return;
        }
    };
    let privileges = args.get(2).map(|list| parse_privileges(list)).unwrap_or_default();

    let index = ctx
        .roster
        .add(Box::new(Admin::new(args[0].clone(), age, privileges)));
    println!("[{}] added admin {}", index, args[0]);
}

/// Split a comma-separated privilege list, dropping empty entries.
fn parse_privileges(list: &str) -> Vec<String> {
    list.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn cmd_intro(ctx: &Context) {
    if ctx.roster.is_empty() {
        println!("Roster is empty. Add someone with 'person' or 'admin'.");
        return;
    }
    for line in ctx.roster.introductions() {
        println!("{}", line);
    }
}

fn cmd_list(ctx: &Context) {
    if ctx.roster.is_empty() {
        println!("Roster is empty.");
        return;
    }
    for (index, line) in ctx.roster.introductions().iter().enumerate() {
        println!("  [{}] {}", index, line);
    }
}

fn cmd_rename(ctx: &mut Context, args: &[String]) {
    if args.len() != 2 {
        println!("Usage: rename <index> <name>");
        return;
    }
    let index = match args[0].parse::<usize>() {
        Ok(index) => index,
        Err(_) => {
            println!("Invalid index: {}", args[0]);
            return;
        }
    };

    match ctx.roster.get_mut(index) {
        Some(member) => {
            member.set_name(args[1].clone());
            println!("[{}] renamed to {}", index, args[1]);
        }
        None => println!("No member at index {} (see 'list')", index),
    }
}

fn cmd_age(ctx: &mut Context, args: &[String]) {
    if args.len() != 2 {
        println!("Usage: age <index> <years>");
        return;
    }
    let index = match args[0].parse::<usize>() {
        Ok(index) => index,
        Err(_) => {
            println!("Invalid index: {}", args[0]);
            return;
        }
    };
    let years = match args[1].parse::<u32>() {
        Ok(years) => years,
        Err(_) => {
            println!("Invalid age: {}", args[1]);
            return;
        }
    };

    match ctx.roster.get_mut(index) {
        Some(member) => {
            member.set_age(years);
            println!("[{}] is now {}", index, years);
        }
        None => println!("No member at index {} (see 'list')", index),
    }
}

fn cmd_demo(ctx: &mut Context, args: &[String]) -> Result<()> {
    let name = args
        .first()
        .map(String::as_str)
        .unwrap_or(demo::DEFAULT_DEMO);
    demo::run(name, &ctx.config, ctx.log.as_mut())
}
