//! Server-rendered HTML pages.

mod form;
mod html;
mod layout;
mod posts;

pub use form::{PostFormView, post_form_page};
pub use posts::{blog_page, dashboard_page, post_detail_page, post_not_found_page};

use layout::page;

pub fn home_page() -> String {
    page(
        "ホーム",
        r#"<div class="hero">
  <h1>Post Writer</h1>
  <a href="/dashboard" class="button">はじめる</a>
</div>"#,
    )
}

pub fn not_found_page() -> String {
    error_page("ページが見つかりません")
}

pub fn error_page(message: &str) -> String {
    page(
        message,
        &format!(
            r#"<div class="empty">
  <h1>{}</h1>
  <a href="/" class="button">ホームに戻る</a>
</div>"#,
            html::escape(message)
        ),
    )
}
