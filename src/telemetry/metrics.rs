use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::LazyLock;

pub static METER: LazyLock<Meter> = LazyLock::new(|| global::meter("rust-axum-mongodb"));

pub static ARTICLES_CREATED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("articles.created")
        .with_description("Total articles created")
        .build()
});

pub static ARTICLES_UPDATED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("articles.updated")
        .with_description("Total articles updated")
        .build()
});

pub static ARTICLES_TOGGLED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("articles.toggled")
        .with_description("Total article status toggles")
        .build()
});

pub static ARTICLES_DELETED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("articles.deleted")
        .with_description("Total articles deleted")
        .build()
});

pub static USERS_CREATED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("users.created")
        .with_description("Total users created")
        .build()
});

pub static USERS_UPDATED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("users.updated")
        .with_description("Total users updated")
        .build()
});

pub static USERS_DELETED: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("users.deleted")
        .with_description("Total users deleted")
        .build()
});

pub static HTTP_REQUESTS_TOTAL: LazyLock<Counter<u64>> = LazyLock::new(|| {
    METER
        .u64_counter("http.requests.total")
        .with_description("Total number of HTTP requests")
        .with_unit("{request}")
        .build()
});

pub static HTTP_REQUEST_DURATION: LazyLock<Histogram<f64>> = LazyLock::new(|| {
    METER
        .f64_histogram("http.request.duration")
        .with_description("HTTP request duration in milliseconds")
        .with_unit("ms")
        .with_boundaries(vec![
            1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0,
        ])
        .build()
});
