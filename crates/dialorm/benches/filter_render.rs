use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dialorm::{
    Dialect, DialectConfig, Executor, FieldKind, FieldMeta, Filter, FilterOp, ModelMeta, Term,
    Value,
};

static DOCS: ModelMeta = ModelMeta::new(
    "documents",
    FieldMeta::new("id", FieldKind::BigInt).generated(),
    &[
        FieldMeta::new("title", FieldKind::Char),
        FieldMeta::new("body", FieldKind::Text),
        FieldMeta::new("meta", FieldKind::Json),
    ],
);

/// `n` text filters cycling through the LIKE-based operators.
fn build_filters(n: usize) -> Vec<Filter> {
    let ops = [
        FilterOp::Contains,
        FilterOp::InsensitiveStartsWith,
        FilterOp::InsensitiveExact,
        FilterOp::EndsWith,
    ];
    (0..n)
        .filter_map(|i| Filter::new("title", ops[i % ops.len()], format!("it's {i}%")).ok())
        .collect()
}

fn bench_where_clause(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_render/where_clause");

    for dialect in [Dialect::MySql, Dialect::Postgres] {
        let exec = Executor::new(DialectConfig::new(dialect), &DOCS);
        for n in [1, 10, 100] {
            let filters = build_filters(n);
            group.bench_with_input(
                BenchmarkId::new(dialect.name(), n),
                &filters,
                |b, filters| {
                    b.iter(|| black_box(exec.where_clause(filters)));
                },
            );
        }
    }

    group.finish();
}

fn bench_json_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_render/json_filter");
    let value = Value::Json(serde_json::json!({
        "owner__name": "alice",
        "size__gte": 10,
        "tags__0__in": ["a", "b", "c"],
        "title__startswith": "50%",
    }));

    for dialect in [Dialect::MySql, Dialect::Postgres] {
        let exec = Executor::new(DialectConfig::new(dialect), &DOCS);
        let filter = Filter {
            field: dialorm::Field::new("meta").unwrap(),
            op: FilterOp::JsonFilter,
            value: value.clone(),
        };
        group.bench_function(dialect.name(), |b| {
            b.iter(|| black_box(exec.build_filter(&filter).map(|c| exec.renderer().criterion(&c))));
        });
    }

    group.finish();
}

fn bench_literal_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_render/literal");

    for len in [16, 256, 4096] {
        let text: String = "a'b\\c%".chars().cycle().take(len).collect();
        let term = Term::value(text);
        group.bench_with_input(BenchmarkId::from_parameter(len), &term, |b, term| {
            let r = Dialect::MySql.renderer();
            b.iter(|| black_box(r.term(term)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_where_clause,
    bench_json_filter,
    bench_literal_escaping
);
criterion_main!(benches);
