use std::io::{BufRead, IsTerminal};
use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Parser;
use luxe_catalog::cli::{Cli, Commands};
use luxe_catalog::commands::{self, Context, OrdersReport, ProductInfo};
use luxe_catalog::orders::OrderQuery;
use luxe_catalog::search::{FilterState, Suggestion};
use luxe_catalog::session::LiveResults;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::parse_from(["luxe", "--help"]);
        return Ok(());
    };

    match command {
        // orders don't read the catalog
        Commands::Orders {
            file,
            status,
            limit,
            offset,
            date,
        } => run_orders(&file, status.as_deref(), limit, offset, date.as_deref()),
        command => run(command, &Context::load(cli.catalog.as_deref())?),
    }
}

fn run_orders(
    file: &Path,
    status: Option<&str>,
    limit: usize,
    offset: usize,
    date: Option<&str>,
) -> anyhow::Result<()> {
    let query = OrderQuery {
        status: status.map(str::parse).transpose()?,
        limit,
        offset,
    };
    let date = date
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .context("Invalid date (expected YYYY-MM-DD)")?;
    print_orders(&commands::orders(file, &query, date)?);
    Ok(())
}

fn run(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            query,
            category,
            brand,
            price,
            sort,
            no_history,
        } => {
            let filters = FilterState::parse(
                category.as_deref(),
                brand.as_deref(),
                price.as_deref(),
                sort.as_deref(),
            )?;
            match commands::search(ctx, &query, &filters, !no_history)? {
                Some(outcome) => {
                    println!("{}", outcome.route);
                    print_products(&outcome.results, &query);
                }
                None => println!("Enter a search term"),
            }
        }
        Commands::Suggest { query } => {
            let suggestions = commands::suggest(ctx, &query);
            if suggestions.is_empty() {
                println!("No results found for \"{query}\"");
            }
            for suggestion in &suggestions {
                print_suggestion(suggestion);
            }
        }
        Commands::Instant { query, limit } => {
            print_instant(&commands::instant(ctx, &query, limit));
        }
        Commands::Live { submit } => {
            let inputs = std::io::stdin()
                .lock()
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to read input")?;
            let outcome =
                tokio::runtime::Runtime::new()?.block_on(commands::live(ctx, &inputs, submit))?;
            match &outcome.results {
                Some(results) => {
                    println!("Results for \"{}\"", results.query);
                    print_instant(results);
                    for completion in &results.completions {
                        println!("did you mean: {completion}");
                    }
                }
                None => println!("Nothing to show"),
            }
            if let Some(route) = outcome.route {
                println!("{route}");
            }
        }
        Commands::Complete { query } => {
            for completion in commands::complete(ctx, &query) {
                println!("{completion}");
            }
        }
        Commands::Shop {
            category,
            price,
            sort,
        } => {
            let filters =
                FilterState::parse(category.as_deref(), None, price.as_deref(), sort.as_deref())?;
            let products = commands::shop(ctx, &filters);
            println!(
                "{} {}",
                products.len(),
                if products.len() == 1 { "product" } else { "products" }
            );
            for product in &products {
                print_product(product);
            }
        }
        Commands::History { clear } => {
            let entries = commands::history(ctx, clear)?;
            if clear {
                println!("Recent searches cleared");
            } else if entries.is_empty() {
                println!("No recent searches");
            }
            for entry in entries {
                println!("{entry}");
            }
        }
        Commands::Cart { items, promo } => {
            let items = items
                .iter()
                .map(|spec| commands::parse_item(spec))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let (cart, totals) = commands::cart(ctx, &items, promo.as_deref())?;
            for line in cart.lines() {
                println!(
                    "{:>3} x {:<32} {:>10.2}",
                    line.quantity,
                    line.name,
                    line.line_total()
                );
            }
            println!("Subtotal: {:.2}", totals.subtotal);
            if totals.shipping == 0.0 {
                println!("Shipping: Free");
            } else {
                println!("Shipping: {:.2}", totals.shipping);
            }
            if totals.discount > 0.0 {
                println!("Discount: -{:.2}", totals.discount);
            }
            println!("Total: {:.2}", totals.total);
        }
        Commands::Orders {
            file,
            status,
            limit,
            offset,
            date,
        } => run_orders(&file, status.as_deref(), limit, offset, date.as_deref())?,
    }

    Ok(())
}

/// Compact stderr logging; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}

fn print_products(products: &[ProductInfo], query: &str) {
    let noun = if products.len() == 1 { "result" } else { "results" };
    println!("{} {noun} found", products.len());
    if products.is_empty() {
        println!("No results found for \"{query}\"");
    }
    for product in products {
        print_product(product);
    }
}

fn print_product(product: &ProductInfo) {
    let brand = product.brand.as_deref().unwrap_or("-");
    println!(
        "{:>3}  {:<30} {:>10.2}  {:<12} {}",
        product.id, product.name, product.price, product.category, brand
    );
}

fn print_instant(results: &LiveResults) {
    if let Some(brand) = &results.brand {
        println!("{} Products", brand.name);
    }
    if results.instant.is_empty() {
        println!("No results found for \"{}\"", results.query);
    }
    for suggestion in &results.instant {
        print_suggestion(suggestion);
    }
}

fn print_suggestion(suggestion: &Suggestion) {
    match suggestion {
        Suggestion::Product { id, name, price, .. } => {
            println!("product   {id:>3}  {name} ({price:.2})");
        }
        Suggestion::Category { id, name } => println!("category  {id}  {name}"),
        Suggestion::Brand { id, name } => println!("brand     {id}  {name}"),
    }
}

fn print_orders(report: &OrdersReport) {
    match report {
        OrdersReport::Page { orders, count } => {
            println!("{} of {count} orders", orders.len());
            for order in orders {
                println!(
                    "{}  {}  {:<20} {:>10.2}  {}",
                    order.id,
                    order.created_at.format("%Y-%m-%d %H:%M"),
                    order.customer_name,
                    order.total_amount,
                    order.payment_status
                );
            }
        }
        OrdersReport::Daily {
            date,
            orders,
            revenue,
            by_status,
        } => {
            println!("Orders for {date}: {}", orders.len());
            println!("Total Revenue: {revenue:.2}");
            for total in by_status {
                println!("  {:<10} {:>3}  {:>10.2}", total.status, total.count, total.amount);
            }
        }
    }
}
