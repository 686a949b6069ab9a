// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

pub const SEARCH_REQUESTS_TOTAL: &str = "newscheck_search_requests_total";
pub const FETCH_TOTAL: &str = "newscheck_fetch_total";
pub const VERDICTS_TOTAL: &str = "newscheck_verdicts_total";
pub const ANALYSIS_DURATION_SECONDS: &str = "newscheck_analysis_duration_seconds";

/// 安装 Prometheus 导出器
///
/// 未启用时不安装任何记录器，下面的记录函数均为空操作
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address {}: {}. Exporter not started.",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!(SEARCH_REQUESTS_TOTAL, "Search provider calls by outcome");
    describe_counter!(FETCH_TOTAL, "Trusted page fetches by outcome");
    describe_counter!(VERDICTS_TOTAL, "Final verdicts by label");
    describe_histogram!(
        ANALYSIS_DURATION_SECONDS,
        Unit::Seconds,
        "End-to-end analysis latency"
    );

    info!("Metrics exporter listening on {}", addr);
}

pub fn record_search(outcome: &'static str) {
    counter!(SEARCH_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_fetch(outcome: &'static str) {
    counter!(FETCH_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_verdict(label: &'static str, elapsed: Duration) {
    counter!(VERDICTS_TOTAL, "label" => label).increment(1);
    histogram!(ANALYSIS_DURATION_SECONDS).record(elapsed.as_secs_f64());
}
