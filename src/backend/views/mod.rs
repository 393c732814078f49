//! HTML Views
//!
//! Tera templates compiled into the binary. Every page extends
//! `layout.html`; pages that know the signed-in user receive it as
//! `current_user`.

use std::sync::Arc;

use axum::response::Html;
use tera::{Context, Tera};

use crate::backend::error::BackendError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("index.html", include_str!("templates/index.html")),
    ("login.html", include_str!("templates/login.html")),
    ("register.html", include_str!("templates/register.html")),
    ("dashboard.html", include_str!("templates/dashboard.html")),
    ("board.html", include_str!("templates/board.html")),
    ("secrets.html", include_str!("templates/secrets.html")),
    ("submit.html", include_str!("templates/submit.html")),
];

/// Compiled template set, cheap to clone
#[derive(Clone)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    pub fn new() -> Result<Self, BackendError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render `name` with `context`
    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>, BackendError> {
        let body = self.tera.render(name, context).map_err(|e| {
            tracing::error!("Failed to render {}: {:?}", name, e);
            e
        })?;
        Ok(Html(body))
    }
}
