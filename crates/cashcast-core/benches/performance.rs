use cashcast_core::{ForecastService, RecurrenceService};
use cashcast_domain::{
    AccountSnapshot, Bill, EventKind, ForecastOverride, ForecastWindow, RecurrenceRule,
    Transaction,
};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const RULES: [RecurrenceRule; 5] = [
    RecurrenceRule::Daily,
    RecurrenceRule::Weekly,
    RecurrenceRule::Monthly,
    RecurrenceRule::Yearly,
    RecurrenceRule::EndOfMonth,
];

fn build_schedule(
    event_count: usize,
) -> (AccountSnapshot, Vec<Bill>, Vec<Transaction>, Vec<ForecastOverride>) {
    let account = AccountSnapshot::new("Checking", 5_000.0);
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    let mut bills = Vec::with_capacity(event_count);
    let mut transactions = Vec::with_capacity(event_count);
    let mut overrides = Vec::new();
    for idx in 0..event_count {
        let anchor = start_date + Duration::days((idx % 60) as i64);
        let rule = RULES[idx % RULES.len()];
        let bill = Bill::new(account.id, format!("Bill {idx}"), 5.0 + (idx % 40) as f64, anchor)
            .with_recurrence(rule);
        if idx % 4 == 0 {
            overrides.push(ForecastOverride::skip(
                account.id,
                EventKind::Bill,
                bill.id,
                anchor,
            ));
        }
        bills.push(bill);

        let txn = Transaction::new(account.id, format!("Income {idx}"), 25.0, anchor)
            .with_recurrence(RULES[(idx + 2) % RULES.len()]);
        transactions.push(txn);
    }
    (account, bills, transactions, overrides)
}

fn bench_recurrence(c: &mut Criterion) {
    let anchor = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let end = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();

    c.bench_function("expand_daily_7y", |b| {
        b.iter(|| {
            let dates = RecurrenceService::expand(black_box(anchor), Some("DAILY"), Some(end))
                .expect("expand");
            black_box(dates);
        })
    });

    c.bench_function("expand_eom_7y", |b| {
        b.iter(|| {
            let dates = RecurrenceService::expand(black_box(anchor), Some("EOM"), Some(end))
                .expect("expand");
            black_box(dates);
        })
    });
}

fn bench_forecast(c: &mut Criterion) {
    let (account, bills, transactions, overrides) = build_schedule(black_box(500));
    let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    c.bench_function("forecast_365d_1k_events", |b| {
        b.iter(|| {
            let result = ForecastService::forecast(
                &account,
                &bills,
                &transactions,
                365,
                100.0,
                &overrides,
                Some(today),
            )
            .expect("forecast");
            black_box(result);
        })
    });

    let window = ForecastWindow::from_horizon(today, 365).expect("window in range");
    c.bench_function("events_365d_1k_events", |b| {
        b.iter(|| {
            let events = ForecastService::events(&bills, &transactions, &overrides, window);
            black_box(events);
        })
    });
}

criterion_group!(benches, bench_recurrence, bench_forecast);
criterion_main!(benches);
