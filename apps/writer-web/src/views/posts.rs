//! Post listings and the detail view.

use writer_core::domain::Post;

use super::html::{escape, format_date, post_href};
use super::layout::page;

/// Public blog: every post with its content, clamped to three lines.
pub fn blog_page(posts: &[Post]) -> String {
    let body = if posts.is_empty() {
        r#"<div class="empty"><p class="muted">まだ投稿がありません</p></div>"#.to_string()
    } else {
        let cards: String = posts
            .iter()
            .map(|post| {
                format!(
                    r#"<div class="card">
  <h2>{title}</h2>
  <p class="muted">{date}</p>
  <p class="line-clamp-3">{content}</p>
</div>"#,
                    title = escape(&post.title),
                    date = format_date(&post.created_at),
                    content = escape(&post.content),
                )
            })
            .collect();
        format!(r#"<div class="grid">{cards}</div>"#)
    };

    page("ブログ", &format!("<h1>ブログ</h1>\n{body}"))
}

/// Dashboard cards linking to each post's detail page.
fn post_list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return r#"<div class="empty"><p class="muted">投稿がありません</p></div>"#.to_string();
    }

    let cards: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<a href="{href}"><div class="card">
  <h2>{title}</h2>
  <p class="muted">{date}</p>
</div></a>"#,
                href = post_href(&post.id, None),
                title = escape(&post.title),
                date = format_date(&post.created_at),
            )
        })
        .collect();
    format!(r#"<div class="grid">{cards}</div>"#)
}

pub fn dashboard_page(posts: &[Post]) -> String {
    let body = format!(
        r#"<div class="row">
  <h1>記事投稿</h1>
  <a href="/dashboard/new" class="button">新しい投稿</a>
</div>
{list}"#,
        list = post_list(posts),
    );
    page("記事投稿", &body)
}

pub fn post_detail_page(post: &Post) -> String {
    let body = format!(
        r#"<div class="narrow">
  <div class="row">
    <h1>投稿詳細</h1>
    <a href="/dashboard" class="button button-outline">戻る</a>
  </div>
  <div class="card">
    <h2>{title}</h2>
    <p class="muted">{date}</p>
    <div class="whitespace-pre-wrap">{content}</div>
  </div>
  <div class="row" style="margin-top: 1.5rem">
    <a href="{edit}" class="button">編集</a>
    <form method="post" action="{delete}">
      <button type="submit" class="button button-danger">削除</button>
    </form>
  </div>
</div>"#,
        title = escape(&post.title),
        date = format_date(&post.created_at),
        content = escape(&post.content),
        edit = post_href(&post.id, Some("edit")),
        delete = post_href(&post.id, Some("delete")),
    );
    page(&post.title, &body)
}

pub fn post_not_found_page() -> String {
    page(
        "投稿が見つかりません",
        r#"<div class="empty">
  <h1>投稿が見つかりません</h1>
  <a href="/dashboard" class="button">ダッシュボードに戻る</a>
</div>"#,
    )
}
