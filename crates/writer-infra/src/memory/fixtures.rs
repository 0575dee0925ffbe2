//! Seed posts served while no backend has answered yet.

use chrono::{DateTime, Duration, Utc};

use writer_core::domain::Post;

pub const FIXTURE_AUTHOR: &str = "user-1";

/// The two development posts, the second one dated a day before `now`.
pub fn fixture_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        Post {
            id: "1".to_string(),
            title: "はじめての投稿".to_string(),
            content: "これは最初のブログ投稿です。ここに内容が入ります。".to_string(),
            created_at: now,
            user_id: FIXTURE_AUTHOR.to_string(),
        },
        Post {
            id: "2".to_string(),
            title: "Next.jsについて".to_string(),
            content: "Next.jsは素晴らしいReactフレームワークです。サーバーサイドレンダリングやAPIルートなど、多くの機能を提供しています。".to_string(),
            created_at: now - Duration::days(1),
            user_id: FIXTURE_AUTHOR.to_string(),
        },
    ]
}
