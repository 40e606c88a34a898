//! Benchmarks for the tickmatch matching engine.
//!
//! ## Performance Targets
//!
//! | Metric              | Target            |
//! |---------------------|-------------------|
//! | Single match latency| < 10μs            |
//! | Throughput          | > 100,000 ops/sec |
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main,
    BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use tickmatch::{LimitOrder, MarketOrder, Orderbook, Request, Side};

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

/// Base price: 50000.00000000 in fixed-point
const BASE_PRICE: u64 = 5_000_000_000_000;

/// Build a limit request with the id doubling as the timestamp, which keeps
/// arrival order and time priority aligned without touching the clock.
fn make_limit(id: u64, side: Side, price: u64, qty: u64) -> Request {
    Request::Limit(LimitOrder::new_at(id, side, qty, price, id).expect("positive size"))
}

fn make_market(id: u64, side: Side, qty: u64) -> Request {
    Request::Market(MarketOrder::new_at(id, side, qty, id).expect("positive size"))
}

/// Pre-populate a book with sell orders at ascending price levels.
fn populate_asks(book: &mut Orderbook, count: usize, base_price: u64, price_step: u64, qty: u64) {
    for i in 0..count {
        let price = base_price + (i as u64 * price_step);
        book.submit(make_limit(1_000_000 + i as u64, Side::Sell, price, qty));
    }
}

/// Pre-populate a book with buy orders at descending price levels.
fn populate_bids(book: &mut Orderbook, count: usize, base_price: u64, price_step: u64, qty: u64) {
    for i in 0..count {
        let price = base_price - (i as u64 * price_step);
        book.submit(make_limit(2_000_000 + i as u64, Side::Buy, price, qty));
    }
}

/// Generate a vector of deterministic requests for throughput testing.
/// Alternates between buy and sell orders with slight price variations.
fn generate_order_batch(count: usize, seed: u64) -> Vec<Request> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let is_buy = rng.gen_bool(0.5);
        // Price variation: ±500.00000000 (in fixed-point)
        let price_offset: i64 = rng.gen_range(-50_000_000_000i64..=50_000_000_000i64);
        let price = (BASE_PRICE as i64 + price_offset) as u64;
        let qty: u64 = rng.gen_range(1..=100);

        let side = if is_buy { Side::Buy } else { Side::Sell };
        orders.push(make_limit((i + 1) as u64, side, price, qty));
    }

    orders
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================
// Target: < 10μs per submit

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");

    // Configure for micro-benchmarking
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(1000);

    // Benchmark: Match against a book with 1,000 resting orders
    group.bench_function("against_1k_orders", |b| {
        let mut book = Orderbook::with_capacity(2000);
        populate_asks(&mut book, 1000, BASE_PRICE, 100_000_000, 100);

        let mut next_id = 10_000_000u64;

        b.iter_batched(
            || {
                next_id += 1;
                make_limit(next_id, Side::Buy, BASE_PRICE, 100)
            },
            |request| {
                // NOTE: This mutates the shared book; the bid either matches
                // a remaining ask or rests, both realistic paths
                black_box(book.submit(request))
            },
            BatchSize::SmallInput,
        );
    });

    // Benchmark: Match that sweeps multiple price levels
    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                // Setup: Fresh book with 100 asks at different prices
                let mut book = Orderbook::with_capacity(200);
                populate_asks(&mut book, 100, BASE_PRICE, 100_000_000, 10);

                // Buy order large enough to sweep ~10 levels
                let buy = make_limit(9_999_999, Side::Buy, BASE_PRICE + 1_000_000_000, 100);
                (book, buy)
            },
            |(mut book, buy)| black_box(book.submit(buy)),
            BatchSize::SmallInput,
        );
    });

    // Benchmark: No-match (order rests on book)
    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || {
                let mut book = Orderbook::with_capacity(2000);
                populate_asks(&mut book, 1000, BASE_PRICE, 100_000_000, 100);

                // Buy order below best ask - will rest on book
                let buy = make_limit(9_999_999, Side::Buy, BASE_PRICE - 100_000_000_000, 100);
                (book, buy)
            },
            |(mut book, buy)| black_box(book.submit(buy)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Order Operations
// ============================================================================
// Measure resting and cancel performance

fn bench_order_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_operations");

    group.measurement_time(Duration::from_secs(5));

    // Benchmark: Rest order on empty book
    group.bench_function("rest_on_empty", |b| {
        b.iter_batched(
            Orderbook::new,
            |mut book| {
                black_box(book.submit(make_limit(1, Side::Buy, BASE_PRICE, 100)))
            },
            BatchSize::SmallInput,
        );
    });

    // Benchmark: Rest order on populated book
    group.bench_function("rest_on_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = Orderbook::with_capacity(2000);
                populate_asks(&mut book, 500, BASE_PRICE, 100_000_000, 100);
                populate_bids(&mut book, 500, BASE_PRICE - 100_000_000, 100_000_000, 100);
                book
            },
            |mut book| {
                black_box(book.submit(make_limit(
                    9_999_999,
                    Side::Buy,
                    BASE_PRICE - 500_000_000_000,
                    100,
                )))
            },
            BatchSize::SmallInput,
        );
    });

    // Benchmark: Cancel order
    group.bench_function("cancel_order", |b| {
        b.iter_batched(
            || {
                let mut book = Orderbook::with_capacity(2000);
                populate_bids(&mut book, 1000, BASE_PRICE, 100_000_000, 100);
                book
            },
            |mut book| {
                // Cancel an order in the middle of the book
                black_box(book.submit(Request::cancel(2_000_500)))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================
// Target: > 100,000 orders/second

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    // Increase measurement time for throughput tests
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    // Test different batch sizes
    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("orders", batch_size),
            &batch_size,
            |b, &size| {
                // Generate orders deterministically (same seed = same orders)
                let orders = generate_order_batch(size, 42);

                b.iter_batched(
                    || (Orderbook::with_capacity(size * 2), orders.clone()),
                    |(mut book, orders)| {
                        for order in orders {
                            book.submit(order);
                        }
                        book.len() // Return something to prevent optimization
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Memory Efficiency
// ============================================================================
// Measure operations with large order books

fn bench_large_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_book");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    // Benchmark with 100k orders in the book
    group.bench_function("match_in_100k_book", |b| {
        // Pre-create the large book (expensive, done once)
        let mut book = Orderbook::with_capacity(120_000);
        populate_asks(&mut book, 50_000, BASE_PRICE, 100_000, 10);
        populate_bids(&mut book, 50_000, BASE_PRICE - 100_000, 100_000, 10);

        let mut next_id = 10_000_000u64;

        // Measure matching performance with large book
        b.iter(|| {
            next_id += 1;
            black_box(book.submit(make_market(next_id, Side::Buy, 10)))
        });
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Determinism Verification
// ============================================================================
// Ensure same sequence produces same results

fn bench_determinism(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinism");

    group.measurement_time(Duration::from_secs(5));

    // Benchmark the deterministic sequence
    group.bench_function("1k_deterministic_sequence", |b| {
        let orders = generate_order_batch(1000, 12345);

        b.iter_batched(
            || orders.clone(),
            |orders| {
                let mut book = Orderbook::with_capacity(2000);

                for order in orders {
                    book.submit(order);
                }

                black_box((book.len(), book.trades().len()))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_single_match,
    bench_order_operations,
    bench_throughput,
    bench_large_book,
    bench_determinism
);

criterion_main!(benches);
