use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::Duration;

use fintrack_rs::{
    initialize_db, local_today,
    models::{CategoryColor, NewBudget, NewCategory, NewGoal, NewTransaction, TransactionType},
    stores::{
        BudgetStore, CategoryStore, GoalStore, TransactionStore,
        sqlite::{SQLiteBudgetStore, SQLiteCategoryStore, SQLiteGoalStore, SQLiteTransactionStore},
    },
};

/// A utility for creating a demo database for the REST API server of fintrack_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let mut category_store = SQLiteCategoryStore::new(conn.clone());
    let mut transaction_store = SQLiteTransactionStore::new(conn.clone());
    let mut budget_store = SQLiteBudgetStore::new(conn.clone());
    let mut goal_store = SQLiteGoalStore::new(conn);

    println!("Creating demo categories...");

    let salary = category_store.create(NewCategory {
        name: "Salary".to_string(),
        category_type: TransactionType::Income,
        color: CategoryColor::Green,
        icon: Some("briefcase".to_string()),
    })?;
    let rent = category_store.create(NewCategory {
        name: "Rent".to_string(),
        category_type: TransactionType::Expense,
        color: CategoryColor::Red,
        icon: Some("home".to_string()),
    })?;
    let groceries = category_store.create(NewCategory {
        name: "Groceries".to_string(),
        category_type: TransactionType::Expense,
        color: CategoryColor::Teal,
        icon: Some("cart".to_string()),
    })?;

    println!("Creating demo transactions...");

    let today = local_today("UTC")?;

    for months_ago in 0..3 {
        let offset = Duration::days(30 * months_ago);

        transaction_store.create(NewTransaction {
            description: "Monthly pay".to_string(),
            amount: 5000.0,
            date: today - offset,
            transaction_type: TransactionType::Income,
            category_id: salary.id,
        })?;
        transaction_store.create(NewTransaction {
            description: "Rent".to_string(),
            amount: 1200.0,
            date: today - offset,
            transaction_type: TransactionType::Expense,
            category_id: rent.id,
        })?;
        transaction_store.create(NewTransaction {
            description: "Weekly shop".to_string(),
            amount: 250.0,
            date: today - offset,
            transaction_type: TransactionType::Expense,
            category_id: groceries.id,
        })?;
    }

    println!("Creating demo budget and goal...");

    budget_store.create(NewBudget {
        category_id: groceries.id,
        amount: 800.0,
        period: "monthly".to_string(),
    })?;

    goal_store.create(NewGoal {
        name: "Emergency fund".to_string(),
        target_amount: 10000.0,
        current_amount: 2500.0,
        target_date: today + Duration::days(365),
        description: Some("Three months of expenses".to_string()),
    })?;

    println!("Success!");

    Ok(())
}
