use chrono::{DateTime, Utc};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use gasmon_core::{GasState, percentage};

const DAY_MS: i64 = 86_400_000;

// Synthetic device trace: a cylinder draining over a few days, swapped
// whenever it runs low.
fn synth_trace(n: usize, seed: u32) -> Vec<(i64, f64, i64)> {
    let mut state = seed.max(1);
    let mut noise = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        (f64::from(x) / (f64::from(u32::MAX) + 1.0) - 0.5) * 0.05
    };
    let mut count = 0i64;
    let mut weight = 28.0f64;
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        weight -= 0.01;
        if weight < 16.0 {
            count += 1;
            weight = 28.0;
        }
        v.push((count, weight + noise(), i as i64 * 2_000));
    }
    v
}

fn ts(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}

pub fn bench_observe(c: &mut Criterion) {
    let mut g = c.benchmark_group("swap_engine");
    // Quick runs: BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p gasmon_core --bench engine
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE")
        && let Ok(n) = ss.parse::<usize>()
    {
        g.sample_size(n.max(10));
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let trace = synth_trace(20_000, 0xC0FFEE);

    g.bench_function("observe_and_record", |b| {
        b.iter_batched(
            || GasState::new(ts(0)),
            |mut state| {
                for &(count, weight, at) in &trace {
                    let _ = state.observe(black_box(count), black_box(weight), ts(at));
                    state.add_reading(weight, at);
                }
                black_box(state.history().len());
            },
            BatchSize::SmallInput,
        )
    });

    g.bench_function("percentage", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(_, weight, _) in &trace {
                acc += percentage(black_box(weight), 15.0, 13.0);
            }
            black_box(acc)
        })
    });

    g.bench_function("history_average_after_a_month", |b| {
        let mut state = GasState::new(ts(0));
        for day in 0..30 {
            let _ = state.observe(day, 20.0, ts(day * DAY_MS));
        }
        b.iter(|| black_box(state.history().average_duration_days()))
    });
    g.finish();
}

criterion_group!(engine, bench_observe);
criterion_main!(engine);
