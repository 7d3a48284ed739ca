//! Theka storefront CLI
//!
//! Browse the shelf, fill a cart and apply coupons as a named user; cart
//! state persists per user under the data directory, so a session can be
//! resumed by running the binary again.

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

use theka_app::{
    config::{LoggingConfig, StorageConfig},
    context::AppContext,
    domain::catalog::{
        CatalogService,
        models::{CatalogQuery, PriceRange, SortKey},
    },
    identity::User,
    logging,
    summary::OrderSummary,
};
use theka_core::{
    pricing::format_amount,
    products::{Category, Product},
};

#[derive(Debug, Parser)]
#[command(name = "theka", about = "Theka storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    storage: StorageConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    /// Act as this user; each user has their own stored cart
    #[arg(long, env = "THEKA_USER", default_value = "guest")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(ProductsCommand),
    /// Show and mutate the cart
    Cart(CartCommand),
    /// Apply a coupon code to the cart
    Coupon(CouponCommand),
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List products, optionally filtered and sorted
    List(ListArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Name,
    PriceLow,
    PriceHigh,
    Rating,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => SortKey::Name,
            SortArg::PriceLow => SortKey::PriceLowToHigh,
            SortArg::PriceHigh => SortKey::PriceHighToLow,
            SortArg::Rating => SortKey::Rating,
        }
    }
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Free-text search over name, description, brand and tags
    #[arg(long)]
    search: Option<String>,

    /// Restrict to one category
    #[arg(long)]
    category: Option<Category>,

    /// Restrict to one brand
    #[arg(long)]
    brand: Option<String>,

    /// Minimum price in rupees
    #[arg(long)]
    min: Option<u64>,

    /// Maximum price in rupees
    #[arg(long)]
    max: Option<u64>,

    /// Result ordering
    #[arg(long, value_enum, default_value_t = SortArg::Name)]
    sort: SortArg,
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the cart and its order summary
    Show,
    /// Add a product to the cart
    Add(AddArgs),
    /// Remove a product from the cart
    Remove(ProductArg),
    /// Set the exact quantity of a cart line (0 removes it)
    SetQty(SetQtyArgs),
    /// Empty the cart and forget any coupon
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product name (or part of it)
    product: String,

    /// How many to add
    #[arg(long, default_value_t = 1)]
    qty: u32,
}

#[derive(Debug, Args)]
struct ProductArg {
    /// Product name (or part of it)
    product: String,
}

#[derive(Debug, Args)]
struct SetQtyArgs {
    /// Product name (or part of it)
    product: String,

    /// The exact quantity to set
    qty: u32,
}

#[derive(Debug, Args)]
struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    /// Validate and apply a coupon code
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// The coupon code, case-insensitive
    code: String,
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let context = AppContext::file_backed(&cli.storage.data_dir)
        .map_err(|error| format!("failed to open storage: {error}"))?;

    match cli.command {
        Commands::Products(ProductsCommand {
            command: ProductsSubcommand::List(args),
        }) => list_products(&context, args).await,
        Commands::Cart(CartCommand { command }) => {
            bind_user(&context, &cli.user).await;
            run_cart_command(&context, command).await
        }
        Commands::Coupon(CouponCommand {
            command: CouponSubcommand::Apply(args),
        }) => {
            bind_user(&context, &cli.user).await;
            apply_coupon(&context, &args.code).await
        }
    }
}

async fn bind_user(context: &AppContext, name: &str) {
    context.session.bind(User::named(name)).await;
}

async fn list_products(context: &AppContext, args: ListArgs) -> Result<(), String> {
    let query = CatalogQuery {
        search: args.search,
        category: args.category,
        brand: args.brand,
        price_range: match (args.min, args.max) {
            (None, None) => None,
            (min, max) => Some(PriceRange {
                min: min.unwrap_or(0) * 100,
                max: max.map(|max| max * 100),
            }),
        },
        sort: args.sort.into(),
    };

    let listed = context
        .catalog
        .list_products(&query)
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if listed.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in &listed {
        let size = product
            .volume
            .as_deref()
            .or(product.weight.as_deref())
            .unwrap_or("-");

        println!(
            "{:<24} {:<16} {:<8} {:>8}  {:>4}  {}",
            product.name,
            product.brand,
            product.category,
            format!("\u{20b9}{}", format_amount(product.price)),
            product.rating,
            size,
        );
    }

    Ok(())
}

async fn run_cart_command(context: &AppContext, command: CartSubcommand) -> Result<(), String> {
    match command {
        CartSubcommand::Show => show_cart(context).await,
        CartSubcommand::Add(args) => {
            let product = resolve_product(context, &args.product).await?;
            context.session.add_to_cart(product, args.qty).await;
            show_cart(context).await
        }
        CartSubcommand::Remove(args) => {
            let product = resolve_product(context, &args.product).await?;
            context.session.remove_from_cart(product.id).await;
            show_cart(context).await
        }
        CartSubcommand::SetQty(args) => {
            let product = resolve_product(context, &args.product).await?;
            context.session.update_quantity(product.id, args.qty).await;
            show_cart(context).await
        }
        CartSubcommand::Clear => {
            context.session.clear_cart().await;
            show_cart(context).await
        }
    }
}

async fn apply_coupon(context: &AppContext, code: &str) -> Result<(), String> {
    if context.session.apply_coupon(code).await {
        show_cart(context).await
    } else {
        Err(format!("coupon `{code}` was not applied"))
    }
}

async fn show_cart(context: &AppContext) -> Result<(), String> {
    let cart = context.session.cart().await;

    if cart.is_empty() {
        println!("cart is empty");
    }

    for line in cart.lines() {
        println!(
            "{:>3} x {:<24} {:>8}",
            line.quantity(),
            line.product().name,
            format!("\u{20b9}{}", format_amount(line.line_total())),
        );
    }

    let summary = OrderSummary::compute(&cart);

    println!();
    println!("subtotal:  \u{20b9}{}", format_amount(summary.subtotal));

    if let Some(code) = cart.applied_coupon() {
        println!(
            "discount:  \u{20b9}{} ({code})",
            format_amount(summary.discount)
        );
    }

    if summary.delivery_fee == 0 {
        println!("delivery:  free");
    } else {
        println!("delivery:  \u{20b9}{}", format_amount(summary.delivery_fee));
    }

    if let Some(shortfall) = summary.free_delivery_shortfall() {
        println!(
            "add \u{20b9}{} more for free delivery",
            format_amount(shortfall)
        );
    }

    println!("total:     \u{20b9}{}", format_amount(summary.total));

    Ok(())
}

/// Finds the product a cart command refers to: an exact (case-insensitive)
/// name match wins, otherwise the search must narrow to a single product.
async fn resolve_product(context: &AppContext, needle: &str) -> Result<Product, String> {
    let listed = context
        .catalog
        .list_products(&CatalogQuery {
            search: Some(needle.to_string()),
            ..CatalogQuery::default()
        })
        .await
        .map_err(|error| format!("failed to search products: {error}"))?;

    if let Some(exact) = listed
        .iter()
        .find(|product| product.name.eq_ignore_ascii_case(needle))
    {
        return Ok(exact.clone());
    }

    match listed.as_slice() {
        [] => Err(format!("no product matches `{needle}`")),
        [only] => Ok(only.clone()),
        many => {
            let names: Vec<_> = many.iter().map(|product| product.name.as_str()).collect();

            Err(format!(
                "`{needle}` matches several products: {}",
                names.join(", ")
            ))
        }
    }
}
