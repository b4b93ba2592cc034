use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use form_core::{
    core::services::{LayoutService, ReorderService, StepService, ValidationService},
    domain::{Field, FieldType, FormSchema, FormValues},
    utils::persistence::{load_schema_from_file, save_schema_to_file},
};
use serde_json::json;
use tempfile::tempdir;

/// `sections` sections, each followed by `per_section` mixed-width fields.
fn build_fields(sections: usize, per_section: usize) -> Vec<Field> {
    let mut fields = Vec::with_capacity(sections * (per_section + 1));
    for s in 0..sections {
        fields.push(Field::new(format!("section_{s}"), FieldType::Section));
        for f in 0..per_section {
            let kind = match f % 4 {
                0 => FieldType::Text,
                1 => FieldType::Email,
                2 => FieldType::Textarea,
                _ => FieldType::Number,
            };
            let mut field = Field::new(format!("field_{s}_{f}"), kind);
            if f % 3 == 0 {
                field = field.required();
            }
            fields.push(field);
        }
    }
    fields
}

fn bench_layout(c: &mut Criterion) {
    let fields = build_fields(50, 20);

    c.bench_function("group_and_rows_1k", |b| {
        b.iter(|| {
            let layout = LayoutService::group(black_box(&fields));
            for group in &layout.sections {
                black_box(LayoutService::group_into_rows(&group.children));
            }
        })
    });

    c.bench_function("derive_steps_1k", |b| {
        b.iter(|| black_box(StepService::derive_steps(black_box(&fields))))
    });
}

fn bench_reorder(c: &mut Criterion) {
    let fields = build_fields(50, 20);

    c.bench_function("move_section_block_1k", |b| {
        b.iter(|| {
            black_box(ReorderService::move_field_to_index(
                black_box(&fields),
                "section_40",
                0,
            ))
        })
    });

    c.bench_function("move_single_field_1k", |b| {
        b.iter(|| {
            black_box(ReorderService::move_field_to_index(
                black_box(&fields),
                "field_3_7",
                fields.len(),
            ))
        })
    });
}

fn bench_validation(c: &mut Criterion) {
    let fields = build_fields(50, 20);
    let mut values = FormValues::new();
    for field in &fields {
        let value = match field.field_type {
            FieldType::Email => json!("someone@example.com"),
            FieldType::Number => json!(12),
            _ => json!("answer"),
        };
        values.insert(field.id.clone(), value);
    }

    c.bench_function("validate_all_1k", |b| {
        b.iter(|| black_box(ValidationService::validate_all(&fields, &values)))
    });
}

fn bench_schema_io(c: &mut Criterion) {
    let schema = FormSchema::new("Benchmark").with_fields(build_fields(50, 20));
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("schema.json");

    c.bench_function("schema_save_1k", |b| {
        b.iter(|| save_schema_to_file(&schema, &path).expect("save schema"))
    });

    save_schema_to_file(&schema, &path).expect("seed");

    c.bench_function("schema_load_1k", |b| {
        b.iter_batched(
            || path.clone(),
            |path| black_box(load_schema_from_file(&path).expect("load schema")),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_layout, bench_reorder, bench_validation, bench_schema_io);
criterion_main!(benches);
