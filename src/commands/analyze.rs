use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::logs::LogRecord;

/// Finalized per-URL request metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UrlMetric {
    #[serde(rename = "handler")]
    pub url: String,
    pub total: u64,
    #[serde(rename = "avg_response_time")]
    pub avg_time: f64,
}

#[derive(Default)]
struct Bucket {
    total_requests: u64,
    sum_response_time: f64,
}

/// Group records by `url` and compute request count and mean `response_time`.
///
/// Records without a non-empty string `url` or with a non-numeric
/// `response_time` are skipped. Booleans do not count as numbers. The result
/// lists URLs in the order they were first seen.
pub fn aggregate_url_metrics(records: &[LogRecord]) -> Vec<UrlMetric> {
    let mut order: Vec<&str> = Vec::new();
    let mut buckets: HashMap<&str, Bucket> = HashMap::new();

    for record in records {
        let Some(url) = record.get("url").and_then(Value::as_str) else {
            continue;
        };
        if url.is_empty() {
            continue;
        }
        let Some(response_time) = record.get("response_time").and_then(numeric) else {
            continue;
        };

        let bucket = buckets.entry(url).or_insert_with(|| {
            order.push(url);
            Bucket::default()
        });
        bucket.total_requests += 1;
        bucket.sum_response_time += response_time;
    }

    order
        .into_iter()
        .filter_map(|url| {
            let bucket = buckets.remove(url)?;
            Some(UrlMetric {
                url: url.to_string(),
                total: bucket.total_requests,
                avg_time: bucket.sum_response_time / bucket.total_requests as f64,
            })
        })
        .collect()
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
