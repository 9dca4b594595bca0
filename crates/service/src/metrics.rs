use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder,
};

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "student_directory_operations_total",
        "Directory operations executed, by operation",
        &["op"]
    )
    .expect("register operations_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "student_directory_not_found_total",
        "Directory lookups that found no student, by operation",
        &["op"]
    )
    .expect("register not_found_total")
});

pub static RECORDS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "student_directory_records",
        "Students currently held in the directory"
    )
    .expect("register records")
});

pub(crate) fn record_op(op: &str) {
    OPERATIONS_TOTAL.with_label_values(&[op]).inc();
}

pub(crate) fn record_not_found(op: &str) {
    NOT_FOUND_TOTAL.with_label_values(&[op]).inc();
}

pub(crate) fn set_records(n: usize) {
    RECORDS.set(n as i64);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposition_contains_registered_families() {
        record_op("metrics_test");
        record_not_found("metrics_test");
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("student_directory_operations_total"));
        assert!(body.contains("student_directory_not_found_total"));
    }
}
