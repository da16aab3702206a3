//! # causerie-cli
//!
//! Interactive console shell for the causerie conversation store.
//!
//! The shell owns no chat state: it reads one menu choice at a time,
//! validates the raw input (names and messages must be non-empty), calls the
//! matching [`ChatApp`] operation, and formats the returned outcome. Capacity
//! limits are taken from the environment (`MAX_USERS`, `MAX_GROUPS`,
//! `MAX_CONVERSATIONS_PER_USER`, `MAX_GROUP_MEMBERS`), logging from
//! `RUST_LOG`.

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use causerie_store::{ChatApp, Limits, StoreError};

fn main() -> anyhow::Result<()> {
    // Logging is off by default so it does not interleave with the menu;
    // opt in with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let limits = Limits::from_env();
    info!(?limits, "Starting causerie v{}", env!("CARGO_PKG_VERSION"));

    let mut app = ChatApp::new(limits);

    let stdin = io::stdin();
    run(&mut app, &mut stdin.lock())
}

/// Drive the menu loop until Exit or end of input.
fn run(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    loop {
        print_menu();
        let Some(choice) = read_line(input)? else {
            break;
        };

        match choice.trim() {
            "1" => create_user(app, input)?,
            "2" => send_message(app, input)?,
            "3" => view_chat(app, input)?,
            "4" => create_group(app, input)?,
            "5" => add_group_member(app, input)?,
            "6" => send_group_message(app, input)?,
            "7" => view_group_chat(app, input)?,
            "8" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice."),
        }
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("=== Causerie ===");
    println!("1. Create User");
    println!("2. Send Message");
    println!("3. View Chat");
    println!("4. Create Group");
    println!("5. Add Group Member");
    println!("6. Send Group Message");
    println!("7. View Group Chat");
    println!("8. Exit");
    print!("Enter choice: ");
    let _ = io::stdout().flush();
}

fn create_user(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(name) = prompt(input, "Enter username: ")? else {
        return Ok(());
    };

    match app.register_user(&name) {
        Ok(()) => println!("User '{name}' created."),
        Err(StoreError::DuplicateUser(_)) => println!("Username already exists."),
        Err(StoreError::CapacityExceeded { .. }) => println!("User limit reached."),
        Err(err) => println!("{err}."),
    }
    Ok(())
}

fn send_message(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(from) = prompt(input, "From: ")? else {
        return Ok(());
    };
    let Some(to) = prompt(input, "To: ")? else {
        return Ok(());
    };
    let Some(text) = prompt(input, "Message: ")? else {
        return Ok(());
    };

    match app.send_message(&from, &to, &text) {
        Ok(()) => println!("Message sent."),
        Err(StoreError::UserNotFound(_)) => println!("One or both users not found."),
        Err(err) => println!("{err}."),
    }
    Ok(())
}

fn view_chat(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(viewer) = prompt(input, "Your username: ")? else {
        return Ok(());
    };
    let Some(counterpart) = prompt(input, "View chat with: ")? else {
        return Ok(());
    };

    match app.view_chat(&viewer, &counterpart) {
        Ok(Some(lines)) => {
            println!("Chat with {counterpart}:");
            for line in lines {
                println!("{line}");
            }
        }
        Ok(None) => println!("No chat history with {counterpart}."),
        Err(StoreError::UserNotFound(_)) => println!("User not found."),
        Err(err) => println!("{err}."),
    }
    Ok(())
}

fn create_group(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(name) = prompt(input, "Enter group name: ")? else {
        return Ok(());
    };
    let Some(count_raw) = prompt(input, "Enter number of members: ")? else {
        return Ok(());
    };
    let Ok(count) = count_raw.trim().parse::<usize>() else {
        println!("Invalid number.");
        return Ok(());
    };

    let mut members = Vec::with_capacity(count);
    for i in 0..count {
        let Some(member) = prompt(input, &format!("Enter member {}: ", i + 1))? else {
            return Ok(());
        };
        members.push(member);
    }

    match app.create_group(&name, &members) {
        Ok(_) => println!("Group '{name}' created."),
        Err(StoreError::CapacityExceeded { resource: "Group", .. }) => {
            println!("Group limit reached.")
        }
        Err(err) => println!("{err}."),
    }
    Ok(())
}

fn add_group_member(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(group) = prompt(input, "Group name: ")? else {
        return Ok(());
    };
    let Some(user) = prompt(input, "Username to add: ")? else {
        return Ok(());
    };

    match app.add_group_member(&group, &user) {
        Ok(()) => println!("'{user}' added to group '{group}'."),
        Err(err) => println!("{err}."),
    }
    Ok(())
}

fn send_group_message(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(sender) = prompt(input, "Sender: ")? else {
        return Ok(());
    };
    let Some(group) = prompt(input, "Group name: ")? else {
        return Ok(());
    };
    let Some(text) = prompt(input, "Message: ")? else {
        return Ok(());
    };

    match app.send_group_message(&sender, &group, &text) {
        Ok(()) => println!("Group message sent."),
        Err(StoreError::NotAMember { .. }) => println!("You are not a member of this group."),
        Err(StoreError::GroupNotFound(_)) => println!("Group not found."),
        Err(err) => println!("{err}."),
    }
    Ok(())
}

fn view_group_chat(app: &mut ChatApp, input: &mut impl BufRead) -> anyhow::Result<()> {
    let Some(group) = prompt(input, "Enter group name: ")? else {
        return Ok(());
    };

    match app.view_group_chat(&group) {
        Ok(lines) => {
            println!("Chat in group '{group}':");
            for line in lines {
                println!("{line}");
            }
        }
        Err(StoreError::GroupNotFound(_)) => println!("Group not found."),
        Err(err) => println!("{err}."),
    }
    Ok(())
}

/// Print `label`, then read one non-empty line. Returns `None` on end of
/// input. Lines are passed through as typed (no trimming); only
/// all-whitespace input is rejected, since the store expects pre-validated,
/// non-empty strings.
fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<Option<String>> {
    loop {
        print!("{label}");
        io::stdout().flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            println!("Input cannot be empty.");
            continue;
        }
        return Ok(Some(line));
    }
}

/// Read one line without its trailing newline. Returns `None` on EOF.
fn read_line(input: &mut impl BufRead) -> anyhow::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
