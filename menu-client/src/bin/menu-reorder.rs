//! menu-reorder — reorder a restaurant's menu from the command line

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use menu_client::{
    AuthEvent, CategoryStore, ClientConfig, DragSession, ListCache, ListScope, MenuCategory,
    MenuItem, MenuItemStore, OverlapPolicy, ReorderController, ReorderOutcome, logger,
    set_item_availability,
};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "menu-reorder", version, about = "Reorder restaurant menu categories and items")]
struct Cli {
    /// API base URL
    #[arg(long, env = "MENU_API_URL")]
    base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "MENU_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Restaurant whose menu is edited
    #[arg(long, env = "MENU_RESTAURANT_ID")]
    restaurant: Option<String>,

    /// Overlapping reorders on one list: serialize | reject
    #[arg(long, env = "MENU_OVERLAP_POLICY")]
    overlap_policy: Option<OverlapPolicy>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit JSON logs
    #[arg(long, env = "LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List categories in display order
    Categories,
    /// List the items of a category in display order
    Items {
        #[arg(long)]
        category: String,
    },
    /// Drag a category onto another one
    MoveCategory { source: String, target: String },
    /// Drag an item onto another item of the same category
    MoveItem {
        #[arg(long)]
        category: String,
        source: String,
        target: String,
    },
    /// Mark an item available or unavailable
    SetAvailability {
        #[arg(long)]
        category: String,
        item: String,
        #[arg(action = ArgAction::Set)]
        available: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads env fallbacks
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logger::init_logger(&cli.log_level, cli.json_logs)?;

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }
    if let Some(restaurant) = cli.restaurant {
        config = config.with_restaurant_id(restaurant);
    }
    if let Some(policy) = cli.overlap_policy {
        config = config.with_overlap_policy(policy);
    }

    let restaurant_id = config
        .restaurant_id
        .clone()
        .context("restaurant id missing (--restaurant or MENU_RESTAURANT_ID)")?;

    let http = config.build_http_client()?;
    let mut auth_events = http.subscribe_auth_events();
    tokio::spawn(async move {
        while let Ok(AuthEvent::SessionExpired) = auth_events.recv().await {
            tracing::error!("Session expired, refresh MENU_API_TOKEN and sign in again");
        }
    });

    tracing::debug!(base_url = %config.base_url, restaurant_id, "menu-reorder starting");

    match cli.command {
        Command::Categories => {
            let controller = ReorderController::new(CategoryStore::new(http), config.overlap_policy);
            let categories = controller.list(&ListScope::from(restaurant_id)).await?;
            print_categories(&categories);
        }
        Command::Items { category } => {
            let controller = ReorderController::new(
                MenuItemStore::new(http, restaurant_id),
                config.overlap_policy,
            );
            let items = controller.list(&ListScope::from(category)).await?;
            print_items(&items);
        }
        Command::MoveCategory { source, target } => {
            let controller = ReorderController::new(CategoryStore::new(http), config.overlap_policy);
            let scope = ListScope::from(restaurant_id);

            let mut session = DragSession::new();
            session.begin(source);
            match controller.drop_on(&mut session, &scope, &target).await? {
                ReorderOutcome::Unchanged => println!("Order unchanged"),
                ReorderOutcome::Applied { written, items } => {
                    println!("Updated {written} categories");
                    print_categories(&items);
                }
            }
        }
        Command::MoveItem {
            category,
            source,
            target,
        } => {
            let controller = ReorderController::new(
                MenuItemStore::new(http, restaurant_id),
                config.overlap_policy,
            );
            let scope = ListScope::from(category);

            let mut session = DragSession::new();
            session.begin(source);
            match controller.drop_on(&mut session, &scope, &target).await? {
                ReorderOutcome::Unchanged => println!("Order unchanged"),
                ReorderOutcome::Applied { written, items } => {
                    println!("Updated {written} items");
                    print_items(&items);
                }
            }
        }
        Command::SetAvailability {
            category,
            item,
            available,
        } => {
            let store = Arc::new(MenuItemStore::new(http, restaurant_id));
            let cache = Arc::new(ListCache::new());
            let controller =
                ReorderController::with_cache(Arc::clone(&store), Arc::clone(&cache), config.overlap_policy);
            let scope = ListScope::from(category);

            // Warm the cache so the toggle has something to roll back
            controller.list(&scope).await?;
            let updated = set_item_availability(store.as_ref(), &cache, &scope, &item, available).await?;
            println!(
                "{} is now {}",
                updated.name,
                if updated.is_available { "available" } else { "unavailable" }
            );
        }
    }

    Ok(())
}

fn print_categories(categories: &[MenuCategory]) {
    for category in categories {
        println!("{:>6}  {:<24}  {}", category.sort_order, category.id, category.name);
    }
}

fn print_items(items: &[MenuItem]) {
    for item in items {
        let flag = if item.is_available { "" } else { "  (unavailable)" };
        println!(
            "{:>6}  {:<24}  {} {:.2}{}",
            item.sort_order, item.id, item.name, item.price, flag
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move_item() {
        let cli = Cli::try_parse_from([
            "menu-reorder",
            "--restaurant",
            "r1",
            "move-item",
            "--category",
            "cat-1",
            "item-a",
            "item-c",
        ])
        .unwrap();

        assert_eq!(cli.restaurant.as_deref(), Some("r1"));
        match cli.command {
            Command::MoveItem {
                category,
                source,
                target,
            } => {
                assert_eq!(category, "cat-1");
                assert_eq!(source, "item-a");
                assert_eq!(target, "item-c");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
