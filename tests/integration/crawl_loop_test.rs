// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::fixtures::hashtag_feed;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tubecrawl::domain::models::scraped_content::{CrawlStatus, ScrapedContent};
use tubecrawl::engines::http_engine::HttpPage;
use tubecrawl::engines::traits::{BrowserPage, EngineError};
use tubecrawl::scrape::controller::CrawlLoop;
use tubecrawl::scrape::hashtag::HashtagSearch;
use tubecrawl::scrape::strategy::{ScrapeError, ScrapeStrategy};
use tubecrawl::scrape::wiki::WikiPage;
use std::time::Duration;

/// Strategy over an in-memory list of view counts with fault injection
struct ScriptedStrategy {
    views: Vec<u64>,
    batch_size: usize,
    min_views: u64,
    fail_fetch_at: Option<usize>,
    fail_extract_at: Option<usize>,
    fetches: AtomicUsize,
    extracted: AtomicUsize,
}

impl ScriptedStrategy {
    fn new(views: Vec<u64>) -> Self {
        Self {
            views,
            batch_size: 36,
            min_views: 0,
            fail_fetch_at: None,
            fail_extract_at: None,
            fetches: AtomicUsize::new(0),
            extracted: AtomicUsize::new(0),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn extracted(&self) -> usize {
        self.extracted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScrapeStrategy for ScriptedStrategy {
    type Node = usize;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    async fn fetch_batch(
        &self,
        _page: &dyn BrowserPage,
        offset: usize,
    ) -> Result<Vec<usize>, ScrapeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch_at == Some(offset) {
            return Err(EngineError::Timeout(Duration::from_secs(300)).into());
        }
        let end = (offset + self.batch_size).min(self.views.len());
        Ok((offset.min(end)..end).collect())
    }

    async fn extract(&self, node: &usize) -> Result<ScrapedContent, ScrapeError> {
        if self.fail_extract_at == Some(*node) {
            return Err(EngineError::NotFound("#video-title".to_string()).into());
        }
        self.extracted.fetch_add(1, Ordering::SeqCst);
        Ok(ScrapedContent {
            video_id: format!("v{}", node),
            title: format!("title {}", node),
            channel: "channel".to_string(),
            video_url: format!("https://www.youtube.com/shorts/v{}", node),
            thumbnail_url: format!("https://i.ytimg.com/vi/v{}/hq2.jpg", node),
            view_count: self.views[*node],
            date: "1일 전".to_string(),
        })
    }

    fn admits(&self, content: &ScrapedContent) -> bool {
        content.view_count >= self.min_views
    }
}

fn blank_page() -> HttpPage {
    HttpPage::from_html("<html><body></body></html>")
}

fn ids(contents: &[ScrapedContent]) -> Vec<String> {
    contents.iter().map(|c| c.video_id.clone()).collect()
}

#[tokio::test]
async fn limit_zero_fetches_nothing() {
    let strategy = ScriptedStrategy::new(vec![5; 10]);
    let result = strategy.run(&blank_page(), 0, &CrawlLoop::default()).await;

    assert_eq!(result.length(), 0);
    assert_eq!(result.status(), CrawlStatus::Complete);
    assert_eq!(strategy.fetches(), 0);
}

#[tokio::test]
async fn stops_at_limit_inside_a_batch() {
    // 50 nodes, exactly 12 qualify: 0, 4, 8, ..., 44
    let views: Vec<u64> = (0..50)
        .map(|i| if i % 4 == 0 && i < 48 { 2_000_000 } else { 10 })
        .collect();
    let qualifying: Vec<usize> = (0..50).filter(|&i| views[i] >= 1_000_000).collect();
    assert_eq!(qualifying.len(), 12);
    let mut strategy = ScriptedStrategy::new(views);
    strategy.min_views = 1_000_000;

    let result = strategy.run(&blank_page(), 10, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::Complete);
    assert_eq!(result.length(), 10);
    assert_eq!(
        ids(result.contents()),
        qualifying[..10]
            .iter()
            .map(|i| format!("v{}", i))
            .collect::<Vec<_>>()
    );
    // The 10th qualifying node is index 36, the first node of the second batch
    assert_eq!(result.visited(), qualifying[9] + 1);
    assert_eq!(result.visited(), 37);
    assert_eq!(strategy.extracted(), 37);
    assert_eq!(strategy.fetches(), 2);
}

#[tokio::test]
async fn short_batch_means_exhausted() {
    let mut strategy = ScriptedStrategy::new(vec![1; 12]);
    strategy.min_views = 2;

    let result = strategy.run(&blank_page(), 10, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToLimit);
    assert_eq!(result.length(), 0);
    assert_eq!(result.visited(), 12);
    assert_eq!(strategy.fetches(), 1);
}

#[tokio::test]
async fn empty_first_batch_means_exhausted() {
    let strategy = ScriptedStrategy::new(Vec::new());
    let result = strategy.run(&blank_page(), 5, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToLimit);
    assert_eq!(result.length(), 0);
}

#[tokio::test]
async fn hard_ceiling_bounds_raw_nodes() {
    let mut strategy = ScriptedStrategy::new(vec![0; 1_000]);
    strategy.min_views = 1;

    let result = strategy.run(&blank_page(), 10, &CrawlLoop::new(400)).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToLimit);
    assert_eq!(result.length(), 0);
    // 12 batches of 36 reach 432 >= 400
    assert_eq!(strategy.fetches(), 12);
    assert_eq!(result.visited(), 432);
}

#[tokio::test]
async fn fetch_fault_keeps_collected_items() {
    let mut strategy = ScriptedStrategy::new(vec![7; 100]);
    strategy.fail_fetch_at = Some(36);

    let result = strategy.run(&blank_page(), 50, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToFault);
    assert_eq!(result.length(), 36);
    assert_eq!(result.contents()[35].video_id, "v35");
}

#[tokio::test]
async fn extract_fault_keeps_items_before_it() {
    let mut strategy = ScriptedStrategy::new(vec![7; 20]);
    strategy.fail_extract_at = Some(3);

    let result = strategy.run(&blank_page(), 10, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToFault);
    assert_eq!(ids(result.contents()), vec!["v0", "v1", "v2"]);
    assert_eq!(result.visited(), 4);
}

#[tokio::test]
async fn fault_on_first_fetch_is_empty() {
    let mut strategy = ScriptedStrategy::new(vec![7; 20]);
    strategy.fail_fetch_at = Some(0);

    let result = strategy.run(&blank_page(), 10, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToFault);
    assert_eq!(result.length(), 0);
}

#[tokio::test]
async fn hashtag_search_over_rendered_feed() {
    let feed = hashtag_feed(&[
        "조회수 1.6억회",
        "조회수 329회",
        "조회수 1282만회",
        "조회수 없음",
        "조회수 100만회",
        "조회수 3.5천회",
    ]);
    let page = HttpPage::from_html(feed);
    let strategy = HashtagSearch::default()
        .with_scroll_pause(Duration::ZERO)
        .with_max_idle_scrolls(1);

    let result = strategy.run(&page, 10, &CrawlLoop::default()).await;

    assert_eq!(result.status(), CrawlStatus::PartialDueToLimit);
    assert_eq!(ids(result.contents()), vec!["v0", "v2", "v4"]);
    let views: Vec<u64> = result.contents().iter().map(|c| c.view_count).collect();
    assert_eq!(views, vec![160_000_000, 12_820_000, 1_000_000]);
    assert_eq!(result.visited(), 6);
}

#[tokio::test]
async fn hashtag_filter_is_stable_on_its_own_output() {
    let page = HttpPage::from_html(hashtag_feed(&[
        "조회수 2000만회",
        "조회수 999,999회",
        "조회수 100만회",
        "조회수 없음",
        "조회수 1.2억회",
    ]));
    let strategy = HashtagSearch::default()
        .with_scroll_pause(Duration::ZERO)
        .with_max_idle_scrolls(1);

    let result = strategy.run(&page, 10, &CrawlLoop::default()).await;
    assert_eq!(ids(result.contents()), vec!["v0", "v2", "v4"]);

    let refiltered: Vec<ScrapedContent> = result
        .contents()
        .iter()
        .filter(|c| strategy.admits(c))
        .cloned()
        .collect();
    assert!(result.contents().iter().all(|c| strategy.admits(c)));
    assert_eq!(refiltered, result.contents());
}

#[tokio::test]
async fn wiki_filter_is_stable_on_its_own_output() {
    let page = HttpPage::from_html(
        r#"<html><body>
            <a href="/w/Rust">Rust</a>
            <a href="https://namu.wiki/w/Go">Go</a>
            <a href="https://example.com/elsewhere">Elsewhere</a>
        </body></html>"#,
    );
    let strategy = WikiPage::default();

    let result = strategy.run(&page, 10, &CrawlLoop::default()).await;
    assert_eq!(result.length(), 2);

    let refiltered: Vec<ScrapedContent> = result
        .contents()
        .iter()
        .filter(|c| strategy.admits(c))
        .cloned()
        .collect();
    assert!(result.contents().iter().all(|c| strategy.admits(c)));
    assert_eq!(refiltered, result.contents());
}
