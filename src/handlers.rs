use std::sync::Arc;

use axum::{
    extract::Path,
    http::{StatusCode, Uri},
    Extension, Json,
};
use serde_json::Value;

use crate::{
    config::SiteConfig,
    conformance::{conform_article, conform_collection, is_url_safe_slug, CollectionReport},
    errors::{RequestError, RequestErrorJsonWrapper},
    LinkResponse, SiteWrapper, ValidatedArticleResponse,
};

type JsonResult<T> = Result<Json<T>, (StatusCode, Json<RequestErrorJsonWrapper>)>;

// ----------------- Helper Handlers -----------------
pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

// ----------------- Site Handlers -----------------
pub async fn get_site(
    Extension(site): Extension<Arc<SiteConfig>>,
) -> Json<SiteWrapper<SiteConfig>> {
    Json(SiteWrapper::wrap_with_site_data(site.as_ref().clone()))
}

pub async fn get_article_link(
    Extension(site): Extension<Arc<SiteConfig>>,
    Path(slug): Path<String>,
) -> JsonResult<LinkResponse> {
    if !is_url_safe_slug(&slug) {
        return Err(RequestError::RunTimeError("Slug is not URL-safe").to_json_response());
    }
    let url = site.article_url(&slug);
    Ok(Json(LinkResponse { slug, url }))
}

// ----------------- Article Handlers -----------------
pub async fn validate_article(Json(payload): Json<Value>) -> JsonResult<ValidatedArticleResponse> {
    let article = conform_article(&payload).map_err(|e| RequestError::from(e).to_json_response())?;
    tracing::debug!(id = article.id, slug = %article.slug(), "article conforms");
    Ok(Json(ValidatedArticleResponse::new(article)))
}

pub async fn validate_articles(Json(payload): Json<Value>) -> JsonResult<CollectionReport> {
    let report =
        conform_collection(&payload).map_err(|e| RequestError::from(e).to_json_response())?;
    tracing::debug!(
        accepted = report.accepted,
        rejected = report.rejected,
        "article collection checked"
    );
    Ok(Json(report))
}
