//! Create / edit form.

use writer_core::domain::Post;

use super::html::{escape, post_href};
use super::layout::page;

/// Values and state of the post form.
#[derive(Debug, Clone, Default)]
pub struct PostFormView {
    /// Id of the post being edited; `None` for a new post.
    pub editing: Option<String>,
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

impl PostFormView {
    pub fn new_post() -> Self {
        Self::default()
    }

    pub fn edit(post: &Post) -> Self {
        Self {
            editing: Some(post.id.clone()),
            title: post.title.clone(),
            content: post.content.clone(),
            error: None,
        }
    }

    fn action(&self) -> String {
        match &self.editing {
            Some(id) => post_href(id, Some("edit")),
            None => "/dashboard/new".to_string(),
        }
    }

    fn cancel_href(&self) -> String {
        match &self.editing {
            Some(id) => post_href(id, None),
            None => "/dashboard".to_string(),
        }
    }
}

pub fn post_form_page(form: &PostFormView) -> String {
    let (heading, submit) = match form.editing {
        Some(_) => ("投稿を編集", "更新"),
        None => ("新しい投稿", "投稿"),
    };

    let error = form
        .error
        .as_deref()
        .map(|e| format!(r#"<p class="error" role="alert">{}</p>"#, escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="narrow">
  <h1>{heading}</h1>
  <div class="card">
    {error}
    <form method="post" action="{action}">
      <div class="field">
        <label for="title">タイトル</label>
        <input id="title" name="title" value="{title}" placeholder="投稿のタイトルを入力" required>
      </div>
      <div class="field">
        <label for="content">内容</label>
        <textarea id="content" name="content" placeholder="投稿の内容を入力" required>{content}</textarea>
      </div>
      <div class="row">
        <a href="{cancel}" class="button button-outline">キャンセル</a>
        <button type="submit" class="button">{submit}</button>
      </div>
    </form>
  </div>
</div>"#,
        action = form.action(),
        title = escape(&form.title),
        content = escape(&form.content),
        cancel = form.cancel_href(),
    );
    page(heading, &body)
}
