// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_gesture::recognizer::Recognizer;
use understory_gesture::registry::handler;
use understory_gesture::set::RecognizerSet;
use understory_gesture::types::{GestureEvent, GestureKind, Timestamp, TouchSignal};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

/// A stream of `contacts` contacts mixing taps, double taps, holds and swipes.
fn gen_mixed_stream(contacts: usize, seed: u64) -> Vec<TouchSignal> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(contacts * 4);
    let mut t = 0_u64;
    for _ in 0..contacts {
        let p = Point::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0);
        out.push(TouchSignal::start(p, Timestamp::from_millis(t)));
        match rng.below(4) {
            // Tap.
            0 => t += 20 + rng.below(100),
            // Hold.
            1 => t += 900,
            // Swipe with a few intermediate moves.
            2 => {
                let d = (rng.next_f64() - 0.5) * 400.0;
                for step in 1..=3 {
                    t += 10;
                    let q = Point::new(p.x + d * f64::from(step) / 3.0, p.y);
                    out.push(TouchSignal::moved(q, Timestamp::from_millis(t)));
                }
            }
            // Jittery tap.
            _ => {
                t += 10;
                out.push(TouchSignal::moved(
                    Point::new(p.x + 2.0, p.y - 2.0),
                    Timestamp::from_millis(t),
                ));
            }
        }
        let last = match out.last() {
            Some(s) => s.position,
            None => p,
        };
        t += 10;
        out.push(TouchSignal::end(last, Timestamp::from_millis(t)));
        // Sometimes follow up quickly enough to form a double tap.
        t += if rng.below(3) == 0 { 80 } else { 500 };
    }
    out
}

fn counting_recognizer(count: &Rc<Cell<u64>>) -> Recognizer<()> {
    let mut rec = Recognizer::new(());
    for kind in GestureKind::ALL {
        let count = count.clone();
        rec.on(
            kind,
            handler(move |_: &(), _: &GestureEvent| {
                count.set(count.get() + 1);
                Ok(())
            }),
        );
    }
    rec
}

fn bench_recognizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognizer");
    for &n in &[256usize, 4096] {
        let stream = gen_mixed_stream(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(stream.len() as u64));
        group.bench_function(format!("mixed_stream_n{}", n), |b| {
            let count = Rc::new(Cell::new(0));
            b.iter_batched(
                || counting_recognizer(&count),
                |mut rec| {
                    for s in &stream {
                        rec.handle(*s).unwrap();
                    }
                    rec.poll(Timestamp::from_millis(u64::MAX)).unwrap();
                    black_box(count.get());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_set_poll(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognizer_set");
    for &n in &[16usize, 256] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("arm_and_poll_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut set: RecognizerSet<usize> = RecognizerSet::new();
                    set.bind_all(0..n);
                    set
                },
                |mut set| {
                    for (i, r) in set.iter_mut().enumerate() {
                        let t = Timestamp::from_millis(i as u64);
                        r.on_start(Point::ZERO, t).unwrap();
                    }
                    while let Some(deadline) = set.next_deadline() {
                        set.poll(deadline).unwrap();
                    }
                    black_box(set.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recognizer, bench_set_poll);
criterion_main!(benches);
