//! tickmatch - demo binary
//!
//! Runs a short scripted session against one book and prints the resulting
//! ladder and trade log.

use tickmatch::types::price::parse_price;
use tickmatch::{Orderbook, Request, Side};
use tracing::info;

fn px(s: &str) -> u64 {
    parse_price(s).expect("literal price")
}

fn main() {
    tracing_subscriber::fmt::init();

    info!("tickmatch demo session");

    let mut book = Orderbook::new();

    let session = vec![
        Request::limit(1, Side::Buy, 100, px("99.50")).expect("valid order"),
        Request::limit(2, Side::Sell, 100, px("100.50")).expect("valid order"),
        Request::limit(3, Side::Buy, 25, px("99.00")).expect("valid order"),
        Request::market(4, Side::Buy, 50).expect("valid order"),
        Request::limit(5, Side::Sell, 40, px("100.50")).expect("valid order"),
        Request::cancel(3),
    ];

    for request in session {
        book.submit(request);
    }

    println!("{}", book);
    println!();
    println!("Trades:");
    for trade in book.trades() {
        println!("  {}", trade);
    }
    println!();
    println!(
        "Resting orders: {} ({} bids / {} asks)",
        book.len(),
        book.order_count(Side::Buy),
        book.order_count(Side::Sell)
    );

    let (bid, ask) = book.spread();
    info!(?bid, ?ask, "final spread");
}
