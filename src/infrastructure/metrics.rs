// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use crate::domain::models::scraped_content::CrawlStatus;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 启用时在配置的地址上暴露 Prometheus 指标
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_counter!("crawl_runs_total", "Crawl loop runs by strategy and status");
    describe_counter!(
        "crawl_items_collected_total",
        "Items that passed the strategy filter"
    );
    describe_counter!("crawl_nodes_visited_total", "Raw page nodes extracted");
    describe_histogram!("crawl_duration_seconds", "Duration of crawl loop runs in seconds");

    info!("Metrics exporter listening on {}", addr);
}

/// 记录一次爬取循环的结果
pub fn record_crawl(
    strategy: &'static str,
    status: CrawlStatus,
    collected: usize,
    visited: usize,
    elapsed: Duration,
) {
    counter!("crawl_runs_total", "strategy" => strategy, "status" => status.as_str())
        .increment(1);
    counter!("crawl_items_collected_total", "strategy" => strategy).increment(collected as u64);
    counter!("crawl_nodes_visited_total", "strategy" => strategy).increment(visited as u64);
    histogram!("crawl_duration_seconds", "strategy" => strategy).record(elapsed.as_secs_f64());
}
