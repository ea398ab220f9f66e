// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Query},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::{
        contents_query::ContentsQueryDto,
        crawl_request::{HashtagCrawlRequestDto, WikiCrawlRequestDto},
        crawl_response::CrawlResponseDto,
    },
    domain::{models::scraped_content::ScrapedContent, services::crawl_service::CrawlService},
    presentation::errors::AppError,
};

/// 爬取话题标签页
///
/// 页面错误不会产生错误状态码，而是体现在响应的 `status` 字段中
pub async fn crawl_hashtag(
    Extension(service): Extension<Arc<CrawlService>>,
    Json(payload): Json<HashtagCrawlRequestDto>,
) -> Result<Json<CrawlResponseDto>, AppError> {
    payload.validate()?;
    let result = service
        .crawl_hashtag(&payload.hashtag, payload.limit)
        .await?;
    Ok(Json(result.into()))
}

/// 爬取维基页面
pub async fn crawl_wiki(
    Extension(service): Extension<Arc<CrawlService>>,
    Json(payload): Json<WikiCrawlRequestDto>,
) -> Result<Json<CrawlResponseDto>, AppError> {
    payload.validate()?;
    let result = service.crawl_wiki(&payload.url, payload.limit).await?;
    Ok(Json(result.into()))
}

/// 查询已保存的内容
pub async fn list_contents(
    Extension(service): Extension<Arc<CrawlService>>,
    Query(params): Query<ContentsQueryDto>,
) -> Result<Json<Vec<ScrapedContent>>, AppError> {
    params.validate()?;
    let contents = service.stored_contents(&params.into()).await?;
    Ok(Json(contents))
}
