//! Boundary checks for content arriving from the CMS.
//!
//! [`conform_article`] decides whether a value *is* an article. [`lint_article`]
//! reports things that are allowed by the shape but likely wrong.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ConformanceError, FieldProblem};
use crate::models::Article;

const STRING_FIELDS: [&str; 9] = [
    "title",
    "description",
    "content",
    "slug",
    "image",
    "created",
    "createdAt",
    "updatedAt",
    "publishedAt",
];

fn check_attributes(attributes: &Map<String, Value>, problems: &mut Vec<FieldProblem>) {
    for field in STRING_FIELDS {
        match attributes.get(field) {
            None | Some(Value::Null) => {
                problems.push(FieldProblem::missing(format!("attributes.{field}")))
            }
            Some(Value::String(_)) => {}
            Some(_) => problems.push(FieldProblem::wrong_type(
                format!("attributes.{field}"),
                "a string",
            )),
        }
    }

    match attributes.get("tags") {
        None | Some(Value::Null) => problems.push(FieldProblem::missing("attributes.tags")),
        Some(Value::Array(tags)) => {
            for (index, tag) in tags.iter().enumerate() {
                if !tag.is_string() {
                    problems.push(FieldProblem::wrong_type(
                        format!("attributes.tags[{index}]"),
                        "a string",
                    ));
                }
            }
        }
        Some(_) => problems.push(FieldProblem::wrong_type(
            "attributes.tags",
            "an array of strings",
        )),
    }
}

/// Check a raw value against the article shape and decode it.
///
/// Every problem is collected before failing so a producer can fix them in one go.
pub fn conform_article(value: &Value) -> Result<Article, ConformanceError> {
    let object = match value.as_object() {
        Some(object) => object,
        None => {
            return Err(ConformanceError::Fields(vec![FieldProblem::wrong_type(
                "$",
                "an object",
            )]))
        }
    };

    let mut problems = vec![];
    match object.get("id") {
        None | Some(Value::Null) => problems.push(FieldProblem::missing("id")),
        Some(id) if id.as_i64().is_some() => {}
        Some(_) => problems.push(FieldProblem::wrong_type("id", "an integer")),
    }
    match object.get("attributes") {
        None | Some(Value::Null) => problems.push(FieldProblem::missing("attributes")),
        Some(Value::Object(attributes)) => check_attributes(attributes, &mut problems),
        Some(_) => problems.push(FieldProblem::wrong_type("attributes", "an object")),
    }

    if !problems.is_empty() {
        return Err(ConformanceError::Fields(problems));
    }
    Ok(Article::deserialize(value)?)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lints: Vec<Lint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<FieldProblem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionReport {
    pub accepted: usize,
    pub rejected: usize,
    pub results: Vec<ItemOutcome>,
    pub duplicate_slugs: Vec<String>,
    pub duplicate_ids: Vec<i64>,
}

impl CollectionReport {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0 && self.duplicate_slugs.is_empty() && self.duplicate_ids.is_empty()
    }
}

/// Check a list of articles, either bare or wrapped as `{ "data": [...] }`.
pub fn conform_collection(value: &Value) -> Result<CollectionReport, ConformanceError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(object) => match object.get("data") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ConformanceError::Fields(vec![FieldProblem::wrong_type(
                    "data",
                    "an array",
                )]))
            }
            None => return Err(ConformanceError::Fields(vec![FieldProblem::missing("data")])),
        },
        _ => {
            return Err(ConformanceError::Fields(vec![FieldProblem::wrong_type(
                "$",
                "an array or an object with data",
            )]))
        }
    };

    let mut report = CollectionReport::default();
    let mut slugs: HashMap<&str, usize> = HashMap::new();
    let mut ids: HashMap<i64, usize> = HashMap::new();
    let mut articles = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match conform_article(item) {
            Ok(article) => {
                report.accepted += 1;
                articles.push((index, article));
            }
            Err(error) => {
                report.rejected += 1;
                report.results.push(ItemOutcome {
                    index,
                    article: None,
                    lints: vec![],
                    problems: error.problems().to_vec(),
                    error: Some(error.to_string()),
                });
            }
        }
    }

    for (_, article) in &articles {
        *slugs.entry(article.slug()).or_default() += 1;
        *ids.entry(article.id).or_default() += 1;
    }
    report.duplicate_slugs = slugs
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug.to_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    report.duplicate_ids = ids
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    for (index, article) in articles {
        report.results.push(ItemOutcome {
            index,
            lints: lint_article(&article),
            article: Some(article),
            problems: vec![],
            error: None,
        });
    }
    report.results.sort_by_key(|outcome| outcome.index);

    if !report.is_clean() {
        tracing::warn!(
            rejected = report.rejected,
            duplicate_slugs = report.duplicate_slugs.len(),
            duplicate_ids = report.duplicate_ids.len(),
            "article collection has problems"
        );
    }
    Ok(report)
}

// ----------------- Lints -----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "lint", rename_all = "camelCase")]
pub enum Lint {
    EmptyTitle,
    SlugNotUrlSafe { slug: String, suggestion: String },
    DuplicateTag { tag: String },
    BadTimestamp { field: &'static str, value: String },
    UpdatedBeforeCreated,
}

/// `[a-z0-9]+(-[a-z0-9]+)*`
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| {
                !part.is_empty()
                    && part
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            })
}

pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn lint_article(article: &Article) -> Vec<Lint> {
    let attributes = &article.attributes;
    let mut lints = vec![];

    if attributes.title.trim().is_empty() {
        lints.push(Lint::EmptyTitle);
    }
    if !is_url_safe_slug(&attributes.slug) {
        lints.push(Lint::SlugNotUrlSafe {
            slug: attributes.slug.clone(),
            suggestion: slugify(&attributes.slug),
        });
    }

    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for tag in &attributes.tags {
        if !seen.insert(tag.as_str()) && reported.insert(tag.as_str()) {
            lints.push(Lint::DuplicateTag { tag: tag.clone() });
        }
    }

    if article.created_on().is_err() {
        lints.push(Lint::BadTimestamp {
            field: "created",
            value: attributes.created.clone(),
        });
    }
    let created_at = article.created_at();
    let updated_at = article.updated_at();
    for (field, value, ok) in [
        ("createdAt", &attributes.created_at, created_at.is_ok()),
        ("updatedAt", &attributes.updated_at, updated_at.is_ok()),
        ("publishedAt", &attributes.published_at, article.published_at().is_ok()),
    ] {
        if !ok {
            lints.push(Lint::BadTimestamp {
                field,
                value: value.clone(),
            });
        }
    }
    if let (Ok(created), Ok(updated)) = (created_at, updated_at) {
        if updated < created {
            lints.push(Lint::UpdatedBeforeCreated);
        }
    }

    lints
}
