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

use crate::domain::models::video::VideoMetadata;
use crate::domain::repositories::video_repository::VideoRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::video as video_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use std::sync::Arc;

/// 视频元数据仓库实现
pub struct VideoRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl VideoRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(m: video_entity::Model) -> VideoMetadata {
    VideoMetadata {
        video_id: m.id,
        title: m.title,
        description: m.description,
        length: m.length,
        views: m.views,
        rating: m.rating,
        publish_date: m.publish_date,
        thumbnail_url: m.thumbnail_url,
    }
}

#[async_trait]
impl VideoRepository for VideoRepositoryImpl {
    async fn save(&self, video: &VideoMetadata) -> Result<VideoMetadata, RepositoryError> {
        let now = Utc::now();
        let active_model = video_entity::ActiveModel {
            id: Set(video.video_id.clone()),
            title: Set(video.title.clone()),
            description: Set(video.description.clone()),
            length: Set(video.length),
            views: Set(video.views),
            rating: Set(video.rating),
            publish_date: Set(video.publish_date),
            thumbnail_url: Set(video.thumbnail_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        video_entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(video_entity::Column::Id)
                    .update_columns([
                        video_entity::Column::Title,
                        video_entity::Column::Description,
                        video_entity::Column::Length,
                        video_entity::Column::Views,
                        video_entity::Column::Rating,
                        video_entity::Column::PublishDate,
                        video_entity::Column::ThumbnailUrl,
                        video_entity::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(video.clone())
    }

    async fn find_by_id(&self, video_id: &str) -> Result<Option<VideoMetadata>, RepositoryError> {
        let model = video_entity::Entity::find_by_id(video_id.to_string())
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(to_domain))
    }
}
