//! End-to-end CLI tests for luxe.
//!
//! These tests exercise the full CLI binary with isolated test environments.
//! Each test creates its own temporary storage directory and config so recent
//! searches never leak between tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Environment Helper
// =============================================================================

/// Isolated test environment with its own config and storage directory.
struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    /// Create an environment that uses the built-in sample catalog.
    fn new() -> Self {
        Self::with_config("")
    }

    /// Create an environment whose config has `extra` appended after the
    /// storage section.
    fn with_config(extra: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();

        let storage_dir = root.join("state");
        let config_path = root.join("config.toml");
        let config_content = format!(
            "[storage]\ndir = \"{}\"\n{extra}",
            storage_dir.display()
        );
        fs::write(&config_path, config_content).expect("Failed to write config");

        Self {
            _temp_dir: temp_dir,
            root,
            config_path,
        }
    }

    /// Get a Command configured for this test environment.
    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("luxe");
        cmd.env("LUXE_CONFIG", &self.config_path);
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write a file under the environment root and return its path.
    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).expect("Failed to write file");
        path
    }
}

const ORDERS: &str = r#"[
    {"id": "ord-1", "created_at": "2026-03-01T09:15:00Z", "customer_name": "Amina", "total_amount": 1950.0, "payment_status": "paid"},
    {"id": "ord-2", "created_at": "2026-03-01T17:40:00Z", "customer_name": "Youssef", "total_amount": 350.0, "payment_status": "pending"},
    {"id": "ord-3", "created_at": "2026-03-02T11:00:00Z", "customer_name": "Sara", "total_amount": 650.0, "payment_status": "paid"}
]"#;

// =============================================================================
// 1. Help / No Command Tests
// =============================================================================

#[test]
fn tc_1_1_no_subcommand_shows_help() {
    let env = TestEnv::new();

    env.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("instant"))
        .stdout(predicate::str::contains("shop"));
}

#[test]
fn tc_1_2_help_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Storefront catalog search and filtering",
        ));
}

#[test]
fn tc_1_3_version_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("luxe"));
}

// =============================================================================
// 2. Search Command Tests
// =============================================================================

#[test]
fn tc_2_1_search_with_matches() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "tote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/search?q=tote"))
        .stdout(predicate::str::contains("1 result found"))
        .stdout(predicate::str::contains("Classic Tote Bag"))
        .stdout(predicate::str::contains("Maison Atlas"));
}

#[test]
fn tc_2_2_search_with_no_matches() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "xyznonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 results found"))
        .stdout(predicate::str::contains(
            "No results found for \"xyznonexistent\"",
        ));
}

#[test]
fn tc_2_3_search_with_category_filter() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "bag", "--category", "collections"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Limited Edition Weekend Bag"))
        .stdout(predicate::str::contains("Classic Tote Bag").not());
}

#[test]
fn tc_2_4_search_sorted_by_price() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["search", "bag", "--sort", "price-low"])
        .output()
        .expect("Failed to run");
    let stdout = String::from_utf8_lossy(&output.stdout);

    let clutch = stdout.find("Mini Evening Clutch").expect("clutch listed");
    let exotic = stdout.find("Exotic Skin Evening Bag").expect("exotic listed");
    assert!(clutch < exotic);
}

#[test]
fn tc_2_5_search_invalid_price_range() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "bag", "--price", "cheap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("price range"));
}

#[test]
fn tc_2_6_search_blank_query() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter a search term"));
}

#[test]
fn tc_2_7_search_encodes_route() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "silk scarf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/search?q=silk%20scarf"));
}

#[test]
fn tc_2_8_search_custom_catalog() {
    let env = TestEnv::new();
    let catalog = env.write(
        "catalog.json",
        r#"{
    "products": [
        {"id": 1, "name": "Amber Perfume", "price": 80, "category": "beauty", "description": "Warm notes.", "image": "p.jpg"}
    ],
    "categories": [{"id": "all", "name": "All Products"}, {"id": "beauty", "name": "Beauty"}],
    "brands": []
}"#,
    );

    env.command()
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "amber"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amber Perfume"));
}

#[test]
fn tc_2_9_search_missing_catalog() {
    let env = TestEnv::with_config("\n[catalog]\npath = \"/nonexistent/catalog.json\"\n");

    env.command()
        .args(["search", "bag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog not found"));
}

#[test]
fn tc_2_10_search_invalid_catalog() {
    let env = TestEnv::new();
    let catalog = env.write("catalog.json", "not valid json");

    env.command()
        .arg("--catalog")
        .arg(&catalog)
        .args(["search", "bag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse catalog"));
}

// =============================================================================
// 3. Suggest / Instant / Complete Tests
// =============================================================================

#[test]
fn tc_3_1_suggest_groups() {
    let env = TestEnv::new();

    env.command()
        .args(["suggest", "wallet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("product").and(predicate::str::contains(
            "Luxury Leather Wallet",
        )))
        .stdout(predicate::str::contains("category  wallets  Wallets"));
}

#[test]
fn tc_3_2_suggest_no_matches() {
    let env = TestEnv::new();

    env.command()
        .args(["suggest", "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found for \"zzzz\""));
}

#[test]
fn tc_3_3_instant_brand_mode() {
    let env = TestEnv::new();

    env.command()
        .args(["instant", "sahara"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sahara Luxe Products"))
        .stdout(predicate::str::contains("Designer Sunglasses"))
        .stdout(predicate::str::contains("Classic Tote Bag").not());
}

#[test]
fn tc_3_4_instant_limit() {
    let env = TestEnv::new();

    let output = env
        .command()
        .args(["instant", "bag", "--limit", "2"])
        .output()
        .expect("Failed to run");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.lines().filter(|l| l.starts_with("product")).count(), 2);
}

#[test]
fn tc_3_5_complete() {
    let env = TestEnv::new();

    env.command()
        .args(["complete", "wallet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wallets"))
        .stdout(predicate::str::contains("Luxury Leather Wallet"));
}

#[test]
fn tc_3_6_live_settles_on_last_input() {
    let env = TestEnv::with_config("\n[search]\ndebounce_ms = 20\n");

    env.command()
        .arg("live")
        .write_stdin("s\nsi\nsilk\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Results for \"silk\""))
        .stdout(predicate::str::contains("Signature Silk Scarf"))
        .stdout(predicate::str::contains("Results for \"si\"").not());
}

#[test]
fn tc_3_7_live_submit_records_history() {
    let env = TestEnv::with_config("\n[search]\ndebounce_ms = 20\n");

    env.command()
        .args(["live", "--submit"])
        .write_stdin("be\nbelt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("/search?q=belt"));

    env.command()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::eq("belt\n"));
}

#[test]
fn tc_3_8_live_blank_final_input() {
    let env = TestEnv::new();

    env.command()
        .arg("live")
        .write_stdin("belt\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show"));
}

// =============================================================================
// 4. Shop Command Tests
// =============================================================================

#[test]
fn tc_4_1_shop_all() {
    let env = TestEnv::new();

    env.command()
        .arg("shop")
        .assert()
        .success()
        .stdout(predicate::str::contains("12 products"));
}

#[test]
fn tc_4_2_shop_category_and_price() {
    let env = TestEnv::new();

    env.command()
        .args(["shop", "--category", "handbags", "--price", "1000-2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 products"))
        .stdout(predicate::str::contains("Elegant Crossbody"))
        .stdout(predicate::str::contains("Classic Tote Bag"));
}

#[test]
fn tc_4_3_shop_unknown_sort() {
    let env = TestEnv::new();

    env.command()
        .args(["shop", "--sort", "popularity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("popularity"));
}

// =============================================================================
// 5. History Command Tests
// =============================================================================

#[test]
fn tc_5_1_history_empty() {
    let env = TestEnv::new();

    env.command()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches"));
}

#[test]
fn tc_5_2_history_records_searches_newest_first() {
    let env = TestEnv::new();

    env.command().args(["search", "tote"]).assert().success();
    env.command().args(["search", "belt"]).assert().success();
    env.command().args(["search", "tote"]).assert().success();

    env.command()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::eq("tote\nbelt\n"));
}

#[test]
fn tc_5_3_history_respects_no_history() {
    let env = TestEnv::new();

    env.command()
        .args(["search", "tote", "--no-history"])
        .assert()
        .success();

    env.command()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches"));
}

#[test]
fn tc_5_4_history_cap_from_config() {
    let env = TestEnv::with_config("\n[search]\nhistory_cap = 2\n");

    for query in ["a", "b", "c"] {
        env.command().args(["search", query]).assert().success();
    }

    env.command()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::eq("c\nb\n"));
}

#[test]
fn tc_5_5_history_clear() {
    let env = TestEnv::new();

    env.command().args(["search", "tote"]).assert().success();
    env.command()
        .args(["history", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent searches cleared"));

    env.command()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches"));
}

// =============================================================================
// 6. Cart Command Tests
// =============================================================================

#[test]
fn tc_6_1_cart_free_shipping() {
    let env = TestEnv::new();

    env.command()
        .args(["cart", "--item", "1:2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal: 3900.00"))
        .stdout(predicate::str::contains("Shipping: Free"))
        .stdout(predicate::str::contains("Total: 3900.00"));
}

#[test]
fn tc_6_2_cart_with_promo() {
    let env = TestEnv::new();

    env.command()
        .args(["cart", "-i", "7", "-i", "8", "--promo", "luxe10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtotal: 600.00"))
        .stdout(predicate::str::contains("Discount: -60.00"))
        .stdout(predicate::str::contains("Total: 540.00"));
}

#[test]
fn tc_6_3_cart_invalid_promo() {
    let env = TestEnv::new();

    env.command()
        .args(["cart", "--item", "1", "--promo", "FREE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FREE"));
}

#[test]
fn tc_6_4_cart_quantity_out_of_range() {
    let env = TestEnv::new();

    env.command()
        .args(["cart", "--item", "1:11"])
        .assert()
        .failure();
}

#[test]
fn tc_6_5_cart_unknown_product() {
    let env = TestEnv::new();

    env.command()
        .args(["cart", "--item", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found: 99"));
}

// =============================================================================
// 7. Orders Command Tests
// =============================================================================

#[test]
fn tc_7_1_orders_list_newest_first() {
    let env = TestEnv::new();
    let file = env.write("orders.json", ORDERS);

    let output = env
        .command()
        .args(["orders", "--file"])
        .arg(&file)
        .output()
        .expect("Failed to run");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("3 of 3 orders"));
    let newest = stdout.find("ord-3").expect("ord-3 listed");
    let oldest = stdout.find("ord-1").expect("ord-1 listed");
    assert!(newest < oldest);
}

#[test]
fn tc_7_2_orders_status_filter_and_paging() {
    let env = TestEnv::new();
    let file = env.write("orders.json", ORDERS);

    env.command()
        .args(["orders", "--status", "paid", "--limit", "1", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 orders"))
        .stdout(predicate::str::contains("ord-3"));
}

#[test]
fn tc_7_3_orders_daily_summary() {
    let env = TestEnv::new();
    let file = env.write("orders.json", ORDERS);

    env.command()
        .args(["orders", "--date", "2026-03-01", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Orders for 2026-03-01: 2"))
        .stdout(predicate::str::contains("Total Revenue: 2300.00"));
}

#[test]
fn tc_7_4_orders_bad_date() {
    let env = TestEnv::new();
    let file = env.write("orders.json", ORDERS);

    env.command()
        .args(["orders", "--date", "March 1", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn tc_7_5_orders_missing_file() {
    let env = TestEnv::new();

    env.command()
        .args(["orders", "--file", "/nonexistent/orders.json"])
        .assert()
        .failure();
}
