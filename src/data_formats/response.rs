use serde::Serialize;

use crate::conformance::{lint_article, Lint};
use crate::models::Article;

#[derive(Serialize, Debug)]
pub struct ValidatedArticleResponse {
    pub article: Article,
    pub lints: Vec<Lint>,
}

#[derive(Serialize, Debug)]
pub struct LinkResponse {
    pub slug: String,
    pub url: String,
}

impl ValidatedArticleResponse {
    pub fn new(article: Article) -> Self {
        ValidatedArticleResponse {
            lints: lint_article(&article),
            article,
        }
    }
}
