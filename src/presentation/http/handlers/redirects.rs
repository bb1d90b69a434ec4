//! Clean-URL redirects for the portfolio site.

use axum::extract::Path;
use axum::response::Redirect;
use reqwest::Url;

const PROJECT_DETAIL_PAGE: &str = "/pages/project-detail.html";

/// Handle GET /admin.
pub async fn admin() -> Redirect {
    Redirect::to("/pages/admin.html")
}

/// Handle GET /login.
pub async fn login() -> Redirect {
    Redirect::to("/pages/login.html")
}

/// Handle GET /project/{id}.
pub async fn project(Path(id): Path<String>) -> Redirect {
    Redirect::to(&project_detail_location(&id))
}

/// Handle GET /about.
pub async fn about() -> Redirect {
    Redirect::to("/#about")
}

/// Handle GET /projects.
pub async fn projects() -> Redirect {
    Redirect::to("/#projects")
}

/// Handle GET /contact.
pub async fn contact() -> Redirect {
    Redirect::to("/#contact")
}

/// Handle GET /resume.
pub async fn resume() -> Redirect {
    Redirect::to("/#resume")
}

/// Builds the detail page location with `id` form-encoded.
fn project_detail_location(id: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost").and_then(|base| base.join(PROJECT_DETAIL_PAGE))
    else {
        return PROJECT_DETAIL_PAGE.to_string();
    };
    url.query_pairs_mut().append_pair("id", id);
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}
