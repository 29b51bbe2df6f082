use std::fs;

use criterion::{Criterion, criterion_group, criterion_main};
use mailtemplate::{FuncMap, LoaderConfig};
use serde_json::json;
use tempfile::TempDir;

fn bench_execute(c: &mut Criterion) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let dir = temp.path().join("weeklyUsage");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("subject.txt"), "Weekly usage for {{toUpper name}}").unwrap();
    fs::write(
        dir.join("html.html"),
        "<ul>{{#each items}}<li>{{this.label}}: {{this.count}}</li>{{/each}}</ul>",
    )
    .unwrap();
    fs::write(dir.join("text.txt"), "{{#each items}}{{this.label}}: {{this.count}}\n{{/each}}").unwrap();

    let registry = LoaderConfig::builder()
        .root_path(temp.path())
        .subject_funcs(FuncMap::new().with_str_fn("toUpper", |s| s.to_uppercase()))
        .load()
        .unwrap();
    let template = registry.get("weeklyUsage").unwrap();
    let items: Vec<_> = (0..20).map(|i| json!({"label": format!("project-{}", i), "count": i})).collect();
    let data = json!({"name": "Jane", "items": items});

    c.bench_function("execute_weekly_usage", |b| b.iter(|| template.execute(&data).unwrap()));
}

criterion_group!(benches, bench_execute);
criterion_main!(benches);
