//! split-engine CLI
//!
//! Compute balances and debts for a shared-expense group from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # Balances for a group file
//! split-engine balances --input group.json
//!
//! # Debts as seen by one member, as JSON
//! split-engine debts --input group.json --viewer Alice --format json
//!
//! # Generate a random group for testing
//! split-engine generate --members 5 --expenses 20
//! ```

use rust_decimal::Decimal;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::group::Group;
use split_engine::core::member::{Member, MemberId};
use split_engine::core::payment::Payment;
use split_engine::simulation::random_group::{generate_random_group, GroupConfig};
use split_engine::view::details::group_details;
use std::collections::HashMap;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — balance and debt resolution for shared-expense groups

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute per-member balances for a group
    debts       Compute suggested or direct debts for a group
    generate    Generate a random group file (for testing)
    help        Show this message

OPTIONS (balances, debts):
    --input <FILE>      Path to JSON group file
    --viewer <NAME>     Member name requesting the view (required for private groups)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --members <N>       Number of members (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --payments <N>      Number of payments (default: 3)
    --private           Generate a private group
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine balances --input group.json
    split-engine debts --input group.json --viewer Alice
    split-engine debts --input group.json --viewer Alice --format json
    split-engine generate --members 8 --expenses 40 --private --output test.json"#
    );
}

/// JSON schema for input group files.
#[derive(serde::Deserialize, serde::Serialize)]
struct GroupFile {
    name: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    private: bool,
    members: Vec<MemberInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
    #[serde(default)]
    payments: Vec<PaymentInput>,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct MemberInput {
    id: String,
    name: String,
}

#[derive(serde::Deserialize, serde::Serialize)]
struct ExpenseInput {
    description: String,
    amount: String,
    paid_by: String,
    participants: Vec<String>,
    #[serde(default = "default_split_mode")]
    split_mode: String,
    #[serde(default)]
    split_data: HashMap<String, String>,
}

fn default_split_mode() -> String {
    "equally".to_string()
}

#[derive(serde::Deserialize, serde::Serialize)]
struct PaymentInput {
    from: String,
    to: String,
    amount: String,
}

fn parse_amount(raw: &str, context: &str) -> Decimal {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid amount '{}' for {}: {}", raw, context, e);
        process::exit(1);
    })
}

fn load_group(path: &str) -> (Group, Vec<Expense>, Vec<Payment>) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: GroupFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "name": "Trip", "code": "X7K2", "private": false,
  "members": [ {{ "id": "u-a", "name": "Alice" }} ],
  "expenses": [
    {{ "description": "Dinner", "amount": "30", "paid_by": "u-a",
       "participants": ["u-a"], "split_mode": "equally" }}
  ],
  "payments": [ {{ "from": "Bob", "to": "Alice", "amount": "10" }} ]
}}"#
        );
        process::exit(1);
    });

    let members: Vec<Member> = file
        .members
        .iter()
        .map(|m| Member::new(m.id.as_str(), m.name.as_str()))
        .collect();

    let group = Group::new(&file.name, &file.code, members)
        .unwrap_or_else(|e| {
            eprintln!("Invalid group: {}", e);
            process::exit(1);
        })
        .with_privacy(file.private);

    let expenses: Vec<Expense> = file
        .expenses
        .iter()
        .map(|e| {
            let amount = parse_amount(&e.amount, &e.description);
            let split_data: HashMap<MemberId, Decimal> = e
                .split_data
                .iter()
                .map(|(id, value)| (MemberId::new(id.as_str()), parse_amount(value, id)))
                .collect();
            let split = match e.split_mode.as_str() {
                "equally" => Split::Equally,
                "shares" => Split::Shares(split_data),
                "amounts" => Split::Amounts(split_data),
                other => {
                    eprintln!("Unknown split mode '{}': use equally, shares, or amounts", other);
                    process::exit(1);
                }
            };
            Expense::new(
                e.description.as_str(),
                amount,
                MemberId::new(e.paid_by.as_str()),
                e.participants.iter().map(|p| MemberId::new(p.as_str())).collect(),
                split,
            )
            .unwrap_or_else(|err| {
                eprintln!("Invalid expense '{}': {}", e.description, err);
                process::exit(1);
            })
        })
        .collect();

    let payments: Vec<Payment> = file
        .payments
        .iter()
        .map(|p| {
            let amount = parse_amount(&p.amount, &format!("payment {} -> {}", p.from, p.to));
            Payment::new(p.from.as_str(), p.to.as_str(), amount).unwrap_or_else(|err| {
                eprintln!("Invalid payment {} -> {}: {}", p.from, p.to, err);
                process::exit(1);
            })
        })
        .collect();

    (group, expenses, payments)
}

struct ViewArgs {
    input: String,
    viewer: Option<String>,
    format: String,
}

fn parse_view_args(args: &[String]) -> ViewArgs {
    let mut input = None;
    let mut viewer = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--viewer" => {
                i += 1;
                viewer = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--viewer requires a member name");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    ViewArgs {
        input: input.unwrap_or_else(|| {
            eprintln!("Error: --input <FILE> is required");
            process::exit(1);
        }),
        viewer,
        format,
    }
}

fn cmd_balances(args: &[String]) {
    let opts = parse_view_args(args);
    let (group, expenses, payments) = load_group(&opts.input);
    let details = group_details(&group, &expenses, &payments, opts.viewer.as_deref());

    if opts.format == "json" {
        match serde_json::to_string_pretty(&details.balances) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("=== Balances: {} ===", group.name());
        for balance in &details.balances {
            println!("  {}", balance);
        }
    }
}

fn cmd_debts(args: &[String]) {
    let opts = parse_view_args(args);
    let (group, expenses, payments) = load_group(&opts.input);

    if group.is_private() && opts.viewer.is_none() {
        eprintln!("Error: --viewer <NAME> is required for private groups");
        process::exit(1);
    }

    let details = group_details(&group, &expenses, &payments, opts.viewer.as_deref());

    if opts.format == "json" {
        match serde_json::to_string_pretty(&details.debts) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("=== Debts: {} ===", group.name());
        if details.debts.is_empty() {
            println!("  all settled");
        }
        for debt in &details.debts {
            println!("  {}", debt);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GroupConfig::default();
    let mut output = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                config.member_count = parse_count(args.get(i), "--members");
            }
            "--expenses" => {
                i += 1;
                config.expense_count = parse_count(args.get(i), "--expenses");
            }
            "--payments" => {
                i += 1;
                config.payment_count = parse_count(args.get(i), "--payments");
            }
            "--private" => {
                config.private_group = true;
            }
            "--output" => {
                i += 1;
                output = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let (group, expenses, payments) = generate_random_group(&config);
    let file = GroupFile {
        name: group.name().to_string(),
        code: group.code().to_string(),
        private: group.is_private(),
        members: group
            .members()
            .iter()
            .map(|m| MemberInput {
                id: m.id.as_str().to_string(),
                name: m.name.clone(),
            })
            .collect(),
        expenses: expenses
            .iter()
            .map(|e| {
                let (split_mode, split_data) = match e.split() {
                    Split::Equally => ("equally", HashMap::new()),
                    Split::Shares(data) => ("shares", stringify_split(data)),
                    Split::Amounts(data) => ("amounts", stringify_split(data)),
                };
                ExpenseInput {
                    description: e.description().to_string(),
                    amount: e.amount().to_string(),
                    paid_by: e.paid_by().as_str().to_string(),
                    participants: e
                        .participants()
                        .iter()
                        .map(|p| p.as_str().to_string())
                        .collect(),
                    split_mode: split_mode.to_string(),
                    split_data,
                }
            })
            .collect(),
        payments: payments
            .iter()
            .map(|p| PaymentInput {
                from: p.from().to_string(),
                to: p.to().to_string(),
                amount: p.amount().to_string(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&file).unwrap_or_else(|e| {
        eprintln!("Error serializing group: {}", e);
        process::exit(1);
    });

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, json) {
                eprintln!("Error writing '{}': {}", path, e);
                process::exit(1);
            }
            println!(
                "Wrote {} members, {} expenses, {} payments to {}",
                config.member_count, expenses.len(), payments.len(), path
            );
        }
        None => println!("{}", json),
    }
}

fn parse_count(arg: Option<&String>, flag: &str) -> usize {
    arg.and_then(|v| v.parse().ok()).unwrap_or_else(|| {
        eprintln!("{} requires a positive integer", flag);
        process::exit(1);
    })
}

fn stringify_split(data: &HashMap<MemberId, Decimal>) -> HashMap<String, String> {
    data.iter()
        .map(|(id, value)| (id.as_str().to_string(), value.to_string()))
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "balances" => cmd_balances(&args[2..]),
        "debts" => cmd_debts(&args[2..]),
        "generate" => cmd_generate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}
