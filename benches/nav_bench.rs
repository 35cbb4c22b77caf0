//! Benchmarks for the header state machine
//!
//! Run with: cargo bench

use careerhub::nav::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn visit_script(catalog: &LinkCatalog) -> Vec<NavEvent> {
    let mut events = vec![
        NavEvent::ViewportResized { width: 390 },
        NavEvent::SessionChanged(SessionStatus::Unauthenticated),
    ];

    for entry in catalog.entries() {
        events.push(NavEvent::ToggleMenu);
        events.push(NavEvent::ActivateLink(entry.clone()));
        if let LinkTarget::Route(path) = &entry.target {
            events.push(NavEvent::RouteChanged(path.clone()));
        }
    }

    events.push(NavEvent::ViewportResized { width: 1280 });
    events
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let script = visit_script(&LinkCatalog::default());

    group.throughput(Throughput::Elements(script.len() as u64));
    group.bench_function("visit_script", |b| {
        b.iter(|| {
            let mut header = NavigationMachine::default();
            for event in script.iter().cloned() {
                black_box(header.dispatch(event));
            }
            header.view()
        })
    });

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    c.bench_function("compose_ctas", |b| {
        b.iter(|| compose(black_box(SessionStatus::Unauthenticated)).len())
    });
}

criterion_group!(benches, bench_dispatch, bench_compose);
criterion_main!(benches);
