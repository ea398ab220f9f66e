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

use crate::domain::models::scraped_content::ScrapedContent;
use crate::domain::repositories::scraped_content_repository::{
    ContentQuery, ScrapedContentRepository,
};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::scraped_content as content_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 抓取内容仓库实现
pub struct ScrapedContentRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ScrapedContentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Keeps the last occurrence of each `video_id`, at the position it first appeared.
///
/// A single upsert statement may not touch the same row twice.
fn latest_per_video(contents: &[ScrapedContent]) -> Vec<&ScrapedContent> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<&ScrapedContent> = Vec::with_capacity(contents.len());

    for content in contents {
        match position.get(content.video_id.as_str()) {
            Some(&i) => unique[i] = content,
            None => {
                position.insert(content.video_id.as_str(), unique.len());
                unique.push(content);
            }
        }
    }
    unique
}

#[async_trait]
impl ScrapedContentRepository for ScrapedContentRepositoryImpl {
    async fn save_all(
        &self,
        source: &str,
        contents: &[ScrapedContent],
    ) -> Result<u64, RepositoryError> {
        let unique = latest_per_video(contents);
        if unique.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let models = unique.iter().map(|c| content_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            source: Set(source.to_string()),
            video_id: Set(c.video_id.clone()),
            title: Set(c.title.clone()),
            channel: Set(c.channel.clone()),
            video_url: Set(c.video_url.clone()),
            thumbnail_url: Set(c.thumbnail_url.clone()),
            view_count: Set(i64::try_from(c.view_count).unwrap_or(i64::MAX)),
            date_text: Set(c.date.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        });

        content_entity::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    content_entity::Column::Source,
                    content_entity::Column::VideoId,
                ])
                .update_columns([
                    content_entity::Column::Title,
                    content_entity::Column::Channel,
                    content_entity::Column::VideoUrl,
                    content_entity::Column::ThumbnailUrl,
                    content_entity::Column::ViewCount,
                    content_entity::Column::DateText,
                    content_entity::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(unique.len() as u64)
    }

    async fn query(&self, filter: &ContentQuery) -> Result<Vec<ScrapedContent>, RepositoryError> {
        let mut select = content_entity::Entity::find();

        if let Some(source) = &filter.source {
            select = select.filter(content_entity::Column::Source.eq(source.as_str()));
        }
        if let Some(min_views) = filter.min_views {
            let min_views = i64::try_from(min_views).unwrap_or(i64::MAX);
            select = select.filter(content_entity::Column::ViewCount.gte(min_views));
        }

        let models = select
            .order_by_desc(content_entity::Column::ViewCount)
            .order_by_asc(content_entity::Column::CreatedAt)
            .limit(filter.limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models
            .into_iter()
            .map(|m| ScrapedContent {
                video_id: m.video_id,
                title: m.title,
                channel: m.channel,
                video_url: m.video_url,
                thumbnail_url: m.thumbnail_url,
                view_count: u64::try_from(m.view_count).unwrap_or(0),
                date: m.date_text,
            })
            .collect())
    }
}
