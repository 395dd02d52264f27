use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use registra::authz::next_scope;
use registra::i18n::Translator;
use registra::model::User;
use registra::DenialKind;

// Benchmarks the pure decision paths: scope resolution and denial
// rendering. Store-backed paths are covered by the integration tests.

fn scope_benchmark(c: &mut Criterion) {
    let actor = User {
        id: 1,
        email: "member@example.org".to_string(),
        superuser: false,
        default_organization_id: Some(5),
    };

    let mut group = c.benchmark_group("scope");
    group.throughput(Throughput::Elements(1));

    group.bench_function("next_scope_fallback", |b| {
        b.iter(|| next_scope(Some(&actor), Some(9), Some(3), false, false))
    });
    group.bench_function("next_scope_unchanged", |b| {
        b.iter(|| next_scope(Some(&actor), None, Some(3), true, false))
    });

    group.finish();
}

fn denial_render_benchmark(c: &mut Criterion) {
    let translator = Translator::new();
    let kind = DenialKind::ImpoundedByOrganization {
        org_name: "City Parking Services".to_string(),
    };

    let mut group = c.benchmark_group("denial");
    group.throughput(Throughput::Elements(1));

    group.bench_function("render_organized_impound", |b| {
        b.iter(|| kind.render(&translator, "bike"))
    });

    group.finish();
}

criterion_group!(benches, scope_benchmark, denial_render_benchmark);
criterion_main!(benches);
