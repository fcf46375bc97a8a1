//! Server-side HTML templates, embedded in the binary.

use std::sync::LazyLock;

use minijinja::{Environment, Value, default_auto_escape_callback};

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(default_auto_escape_callback);
    env.set_loader(embedded_template_loader);
    env
});

/// Render the named template with `context`.
pub fn render(template_name: &str, context: Value) -> Result<String, minijinja::Error> {
    ENV.get_template(template_name)?.render(context)
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "base.html" => Some(include_str!("base.html")),
        "error.html" => Some(include_str!("error.html")),

        "users/list.html" => Some(include_str!("users/list.html")),
        "users/new.html" => Some(include_str!("users/new.html")),
        "users/detail.html" => Some(include_str!("users/detail.html")),
        "users/edit.html" => Some(include_str!("users/edit.html")),

        "posts/detail.html" => Some(include_str!("posts/detail.html")),
        "posts/new.html" => Some(include_str!("posts/new.html")),
        "posts/edit.html" => Some(include_str!("posts/edit.html")),

        "tags/list.html" => Some(include_str!("tags/list.html")),
        "tags/detail.html" => Some(include_str!("tags/detail.html")),
        "tags/new.html" => Some(include_str!("tags/new.html")),
        "tags/edit.html" => Some(include_str!("tags/edit.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
