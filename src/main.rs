//! Payoff Planner CLI
//!
//! Manage stored cards and run payoff projections from the command line

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

use payoff_planner::cards::load_cards;
use payoff_planner::projection::export_projection;
use payoff_planner::store::PersistPolicy;
use payoff_planner::{
    allocate, Card, CardPatch, CardService, ComparisonResult, FileStore, NewCard, PaymentMap,
    PayoffProjection, PlannerConfig, ProjectionConfig, ScenarioRunner, Strategy, StrategyKind,
};

#[derive(Parser, Debug)]
#[command(name = "payoff_planner", about = "Plan credit-card debt payoff strategies")]
struct Cli {
    /// Card store file (overrides PLANNER_STORE_PATH; default cards.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// User whose cards are used (overrides PLANNER_USER_ID)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Fail instead of warning when the store file cannot be written
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage stored cards
    #[command(subcommand)]
    Cards(CardsCommand),

    /// Project payoff under one strategy
    Project(ProjectArgs),

    /// Compare strategies against minimum payments
    Compare(CompareArgs),
}

#[derive(Subcommand, Debug)]
enum CardsCommand {
    List,
    Add(CardFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PatchFields,
    },
    Delete {
        id: String,
    },
    /// Import cards from a CSV file
    Import {
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct CardFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    balance: f64,
    /// Annual rate in percent
    #[arg(long)]
    rate: f64,
    #[arg(long)]
    min_payment: f64,
    #[arg(long, default_value_t = 1)]
    payment_date: u8,
    #[arg(long)]
    grace_period: Option<u32>,
    #[arg(long)]
    currency: Option<String>,
}

#[derive(Args, Debug)]
struct PatchFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    balance: Option<f64>,
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long)]
    min_payment: Option<f64>,
    #[arg(long)]
    payment_date: Option<u8>,
    #[arg(long)]
    grace_period: Option<u32>,
    #[arg(long)]
    currency: Option<String>,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long, default_value = "minimum")]
    strategy: StrategyKind,

    /// Total monthly payment across all cards
    #[arg(long)]
    budget: Option<f64>,

    /// Custom payment as card_id=amount (repeatable)
    #[arg(long = "custom", value_parser = parse_custom_payment)]
    custom: Vec<(String, f64)>,

    /// First projected month (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = parse_month)]
    start: Option<NaiveDate>,

    /// Write monthly rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the projection as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Strategies to compare; defaults to the standard set for the budget
    #[arg(long, value_delimiter = ',')]
    strategies: Vec<StrategyKind>,

    #[arg(long)]
    budget: Option<f64>,

    #[arg(long, value_parser = parse_month)]
    start: Option<NaiveDate>,

    #[arg(long)]
    json: bool,
}

fn parse_custom_payment(value: &str) -> Result<(String, f64), String> {
    let (id, amount) = value
        .split_once('=')
        .ok_or_else(|| format!("expected card_id=amount, got '{}'", value))?;
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount in '{}'", value))?;
    Ok((id.trim().to_string(), amount))
}

fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM, got '{}'", value))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = PlannerConfig::from_env().context("reading PLANNER_* environment")?;
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    if let Some(user) = cli.user {
        config.user_id = user;
    }
    if cli.strict {
        config.persist_policy = PersistPolicy::FailRequest;
    }

    let store = FileStore::open(&config.store_path, config.persist_policy)
        .with_context(|| format!("opening card store {}", config.store_path.display()))?;
    let service = CardService::for_user(store, config.user_id.clone())
        .with_default_currency(config.currency.clone());

    match cli.command {
        Command::Cards(command) => run_cards(&service, command),
        Command::Project(args) => run_project(&service, args),
        Command::Compare(args) => run_compare(&service, args),
    }
}

fn run_cards(service: &CardService<FileStore>, command: CardsCommand) -> Result<()> {
    match command {
        CardsCommand::List => {
            println!("Cards for user {}:", service.user_id());
            print_cards(&service.list_cards()?);
        }
        CardsCommand::Add(fields) => {
            let card = service.add_card(NewCard {
                name: fields.name,
                balance: fields.balance,
                interest_rate: fields.rate,
                min_payment: fields.min_payment,
                payment_date: fields.payment_date,
                grace_period: fields.grace_period,
                currency: fields.currency,
            })?;
            println!("Added card {} ({})", card.name, card.id);
        }
        CardsCommand::Update { id, fields } => {
            let patch = CardPatch {
                name: fields.name,
                balance: fields.balance,
                interest_rate: fields.rate,
                min_payment: fields.min_payment,
                payment_date: fields.payment_date,
                grace_period: fields.grace_period,
                currency: fields.currency,
            };
            if patch.is_empty() {
                bail!("nothing to update for card {}", id);
            }
            let card = service.update_card(&id, &patch)?;
            println!("Updated card {} ({})", card.name, card.id);
        }
        CardsCommand::Delete { id } => {
            service.delete_card(&id)?;
            println!("Deleted card {}", id);
        }
        CardsCommand::Import { path } => {
            let new_cards =
                load_cards(&path).with_context(|| format!("reading {}", path.display()))?;
            let added = service.add_cards(new_cards)?;
            println!("Imported {} cards from {}", added.len(), path.display());
        }
    }
    Ok(())
}

fn runner_for(start: Option<NaiveDate>) -> ScenarioRunner {
    match start {
        Some(date) => ScenarioRunner::with_config(ProjectionConfig::starting(date)),
        None => ScenarioRunner::new(),
    }
}

fn run_project(service: &CardService<FileStore>, args: ProjectArgs) -> Result<()> {
    let cards = service.list_cards()?;

    let strategy = match args.strategy {
        StrategyKind::Custom => {
            if args.custom.is_empty() {
                bail!("custom strategy needs at least one --custom card_id=amount");
            }
            let payments: BTreeMap<String, f64> = args.custom.into_iter().collect();
            if let Some(unknown) = payments.keys().find(|id| !cards.iter().any(|c| &c.id == *id)) {
                return Err(anyhow!("Card not found: {}", unknown));
            }
            Strategy::custom(payments)
        }
        kind => Strategy::new(kind).with_budget(args.budget),
    };

    let projection = runner_for(args.start).simulate(&cards, &strategy)?;
    let payments = allocate(&cards, &strategy);

    if let Some(path) = &args.csv {
        export_projection(&projection, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Monthly rows written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        println!("Strategy: {}", strategy.kind.display_name());
        print_payments(&cards, &payments);
        print_projection(&cards, &projection);
    }
    Ok(())
}

fn run_compare(service: &CardService<FileStore>, args: CompareArgs) -> Result<()> {
    let cards = service.list_cards()?;
    let runner = runner_for(args.start);

    let result = if args.strategies.is_empty() {
        runner.compare_default(&cards, args.budget)?
    } else {
        if args.strategies.contains(&StrategyKind::Custom) {
            bail!("custom payments are only supported by the project command");
        }
        let strategies: Vec<Strategy> = args
            .strategies
            .iter()
            .map(|&kind| Strategy::new(kind).with_budget(args.budget))
            .collect();
        runner.compare(&cards, &strategies)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_comparison(&result);
    }
    Ok(())
}

fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No cards stored.");
        return;
    }
    println!(
        "{:<36} {:<20} {:>12} {:>7} {:>10} {:>4} {:>4}",
        "Id", "Name", "Balance", "Rate%", "MinPay", "Day", "Cur"
    );
    println!("{}", "-".repeat(99));
    for card in cards {
        println!(
            "{:<36} {:<20} {:>12.2} {:>7.2} {:>10.2} {:>4} {:>4}",
            card.id,
            card.name,
            card.balance,
            card.interest_rate,
            card.min_payment,
            card.payment_date,
            card.currency()
        );
    }
}

fn print_payments(cards: &[Card], payments: &PaymentMap) {
    println!("Monthly payments:");
    for ((card_id, amount), card) in payments.iter().zip(cards) {
        println!("  {:<20} {:>12.2}  ({})", card.name, amount, card_id);
    }
    println!("  {:<20} {:>12.2}\n", "Total", payments.total());
}

fn print_projection(cards: &[Card], projection: &PayoffProjection) {
    println!(
        "{:>5} {:>8} {:>14} {:>12} {:>12} {:>12}",
        "Month", "Date", "Balance", "Payment", "Interest", "Principal"
    );
    println!("{}", "-".repeat(68));
    for step in projection.projections.iter().take(24) {
        println!(
            "{:>5} {:>8} {:>14.2} {:>12.2} {:>12.2} {:>12.2}",
            step.month,
            step.date,
            step.total_balance,
            step.total_payment,
            step.total_interest,
            step.total_principal
        );
    }
    if projection.projections.len() > 24 {
        println!("... ({} more months)", projection.projections.len() - 24);
    }

    let currency = cards.first().map(|c| c.currency()).unwrap_or_default();
    println!("\nSummary:");
    println!("  Total Months: {}", projection.total_months);
    if projection.is_paid_off() {
        println!("  Payoff Date: {}", projection.payoff_date);
    } else {
        println!(
            "  Not paid off ({:?}); {:.2} {} remaining",
            projection.termination,
            projection.remaining_balance(),
            currency
        );
    }
    println!("  Total Interest: {:.2} {}", projection.total_interest_paid, currency);
    println!("  Total Principal: {:.2} {}", projection.total_principal_paid, currency);
    println!("  Total Paid: {:.2} {}", projection.total_paid(), currency);
    println!("  Efficiency: {}%", projection.efficiency);
}

fn print_comparison(result: &ComparisonResult) {
    println!(
        "{:<34} {:>7} {:>12} {:>14} {:>12} {:>6}",
        "Strategy", "Months", "Payoff", "Interest", "Savings", "Faster"
    );
    println!("{}", "-".repeat(90));
    println!(
        "{:<34} {:>7} {:>12} {:>14.2} {:>12} {:>6}",
        "Baseline (minimum payments)",
        result.baseline.total_months,
        result.baseline.payoff_date,
        result.baseline.total_interest_paid,
        "-",
        "-"
    );
    for comparison in &result.strategies {
        println!(
            "{:<34} {:>7} {:>12} {:>14.2} {:>12.2} {:>6}",
            comparison.strategy.kind.display_name(),
            comparison.projection.total_months,
            comparison.projection.payoff_date,
            comparison.projection.total_interest_paid,
            comparison.savings,
            comparison.months_diff
        );
    }

    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for line in &result.recommendations {
            println!("  - {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_custom_payment() {
        assert_eq!(parse_custom_payment("a=120.5").unwrap(), ("a".to_string(), 120.5));
        assert!(parse_custom_payment("a").is_err());
        assert!(parse_custom_payment("a=x").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2025-03").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_month("2025-13").is_err());
    }

    #[test]
    fn test_cli_parses_compare() {
        let cli = Cli::try_parse_from([
            "payoff_planner",
            "compare",
            "--strategies",
            "avalanche,snowball",
            "--budget",
            "500",
        ])
        .unwrap();
        match cli.command {
            Command::Compare(args) => {
                assert_eq!(args.strategies, vec![StrategyKind::Avalanche, StrategyKind::Snowball]);
                assert_eq!(args.budget, Some(500.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
