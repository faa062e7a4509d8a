use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mindbridge_auth::{Actor, Role};
use mindbridge_navigation::AccessResolver;

fn bench_route_resolution(c: &mut Criterion) {
    let resolver = AccessResolver::builtin().expect("built-in catalog is valid");
    let staff = Actor::with_permissions(Role::Backoffice, ["VIEW_CLIENTS", "EDIT_CLIENTS"]);

    let mut group = c.benchmark_group("resolve_route");
    for path in [
        "/backoffice/clients",
        "/backoffice/clients/42/edit",
        "/dashboard",
        "/no/such/route/at/all",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(path), path, |b, path| {
            b.iter(|| resolver.resolve_route(black_box(&staff), black_box(path)))
        });
    }
    group.finish();
}

fn bench_menu_filter(c: &mut Criterion) {
    let resolver = AccessResolver::builtin().expect("built-in catalog is valid");

    let mut group = c.benchmark_group("menu_items");
    for role in Role::ALL {
        let actor = Actor::new(role);
        group.bench_with_input(BenchmarkId::from_parameter(role), &actor, |b, actor| {
            b.iter(|| resolver.menu_items(black_box(actor)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_route_resolution, bench_menu_filter);
criterion_main!(benches);
