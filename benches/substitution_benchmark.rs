//! Benchmarks for token substitution and request preparation.
//!
//! These measure the per-request cost of the substitution engine and the
//! full preparation pipeline, which run once for every simulated request a
//! load-test driver dispatches.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use preflight::config::{AppSettings, PluginParams};
use preflight::context::Context;
use preflight::models::request::{HttpMethod, HttpRequest};
use preflight::prepare::prepare_request;
use preflight::variables::substitute_at_token;

/// Generate a context with a specified number of variables.
fn generate_context(num_vars: usize) -> Context {
    let mut context = Context::new();

    for i in 0..num_vars {
        context.set(format!("var_{}", i), format!("value_{}", i));
    }

    context.set("serviceUrl", "https://api.example.com");
    context.set("authToken", "bearer_token_12345");
    context.set("apiKey", "api_key_67890");

    context
}

/// Benchmark a single whole-string token substitution.
fn bench_substitute_token(c: &mut Criterion) {
    let context = generate_context(10);

    c.bench_function("substitute_token", |b| {
        b.iter(|| substitute_at_token(black_box("@apiKey@"), black_box(&context)))
    });
}

/// Benchmark substitution passthrough on values that are not tokens.
fn bench_substitute_passthrough(c: &mut Criterion) {
    let context = generate_context(10);

    c.bench_function("substitute_passthrough", |b| {
        b.iter(|| substitute_at_token(black_box("application/json"), black_box(&context)))
    });
}

/// Benchmark substitution against contexts of increasing size.
fn bench_substitute_large_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute_large_context");

    for ctx_size in [10, 100, 500, 1000].iter() {
        let context = generate_context(*ctx_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_vars", ctx_size)),
            ctx_size,
            |b, size| {
                let token = format!("@var_{}@", size / 2);
                b.iter(|| substitute_at_token(black_box(&token), black_box(&context)))
            },
        );
    }

    group.finish();
}

/// Benchmark full request preparation with many tokenized headers.
fn bench_prepare_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_request");

    for num_headers in [5, 25, 100].iter() {
        group.throughput(Throughput::Elements(*num_headers as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_headers", num_headers)),
            num_headers,
            |b, &n| {
                b.iter(|| {
                    let mut context = generate_context(100);
                    let mut request =
                        HttpRequest::new(HttpMethod::POST, "@serviceUrl@/orders");
                    for i in 0..n {
                        request.add_header(format!("X-Header-{}", i), format!("@var_{}@", i));
                    }

                    black_box(prepare_request(
                        request,
                        &mut context,
                        &PluginParams::new(),
                        &AppSettings::new(),
                    ))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark preparation with body templating and signing enabled.
fn bench_prepare_with_body(c: &mut Criterion) {
    let params = PluginParams {
        variable_request_body: Some(r#"{"field_1":"{{var_1}}","field_2":"{{var_2}}"}"#.to_string()),
        sign_request: true,
        ..PluginParams::new()
    };

    let mut valid = String::from("{");
    for i in 0..50 {
        if i > 0 {
            valid.push(',');
        }
        valid.push_str(&format!(r#""field_{}":"value_{}""#, i, i));
    }
    valid.push('}');

    c.bench_function("prepare_with_body", |b| {
        b.iter(|| {
            let mut context = generate_context(100);
            context.set("SuccessRequestBody", valid.clone());
            let request = HttpRequest::new(HttpMethod::POST, "@serviceUrl@/orders");

            black_box(prepare_request(
                request,
                &mut context,
                &params,
                &AppSettings::new(),
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_substitute_token,
    bench_substitute_passthrough,
    bench_substitute_large_context,
    bench_prepare_request,
    bench_prepare_with_body
);

criterion_main!(benches);
