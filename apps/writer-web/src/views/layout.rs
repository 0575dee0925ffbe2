//! Page shell shared by every HTML route.

use super::html::escape;

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #111; }
header { border-bottom: 1px solid #e5e5e5; }
.container { max-width: 1080px; margin: 0 auto; padding: 0 1rem; }
.nav { display: flex; height: 4rem; align-items: center; justify-content: space-between; }
.nav-links { display: flex; align-items: center; gap: 1.5rem; }
.brand { font-size: 1.25rem; font-weight: 700; }
main { padding: 2rem 0; }
a { color: inherit; text-decoration: none; }
.button { display: inline-block; padding: .5rem 1rem; border-radius: .375rem; background: #111; color: #fff; border: 1px solid #111; cursor: pointer; font-size: .875rem; }
.button-outline { background: #fff; color: #111; }
.button-danger { background: #b91c1c; border-color: #b91c1c; }
.grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); }
.card { border: 1px solid #e5e5e5; border-radius: .5rem; padding: 1.25rem; height: 100%; box-sizing: border-box; }
.card:hover { background: #fafafa; }
.muted { color: #6b7280; font-size: .875rem; }
.line-clamp-3 { display: -webkit-box; -webkit-line-clamp: 3; -webkit-box-orient: vertical; overflow: hidden; }
.whitespace-pre-wrap { white-space: pre-wrap; }
.narrow { max-width: 42rem; margin: 0 auto; }
.row { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; gap: .5rem; }
.empty { text-align: center; padding: 2.5rem 0; }
.field { margin-bottom: 1rem; }
.field label { display: block; font-size: .875rem; font-weight: 500; margin-bottom: .5rem; }
.field input, .field textarea { width: 100%; padding: .5rem; border: 1px solid #d4d4d4; border-radius: .375rem; box-sizing: border-box; font: inherit; }
.field textarea { min-height: 200px; }
.error { color: #b91c1c; margin-bottom: 1rem; }
.hero { display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 70vh; }
"#;

fn header() -> &'static str {
    r#"<header>
  <div class="container nav">
    <div class="nav-links">
      <a href="/" class="brand">Post Writer</a>
      <a href="/blog">ブログ</a>
    </div>
    <div>
      <a href="/login" class="button button-outline">ログイン</a>
    </div>
  </div>
</header>"#
}

/// Wrap `body` (already rendered HTML) in the site layout.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Post Writer</title>
  <style>{STYLES}</style>
</head>
<body>
{header}
<main class="container">
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        header = header(),
    )
}
