use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::TimestampError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub attributes: ArticleAttributes,
}

/// Timestamps are kept exactly as the CMS sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAttributes {
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: String,
    pub image: String,
    pub created: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub tags: Vec<String>,
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_rfc3339(value).map_err(|source| TimestampError::Malformed {
        value: value.to_owned(),
        source,
    })
}

impl Article {
    pub fn slug(&self) -> &str {
        &self.attributes.slug
    }

    pub fn created_at(&self) -> Result<DateTime<FixedOffset>, TimestampError> {
        parse_timestamp(&self.attributes.created_at)
    }

    pub fn updated_at(&self) -> Result<DateTime<FixedOffset>, TimestampError> {
        parse_timestamp(&self.attributes.updated_at)
    }

    pub fn published_at(&self) -> Result<DateTime<FixedOffset>, TimestampError> {
        parse_timestamp(&self.attributes.published_at)
    }

    /// The editorial `created` date. Accepts a bare `YYYY-MM-DD` or a full timestamp.
    pub fn created_on(&self) -> Result<NaiveDate, TimestampError> {
        let value = self.attributes.created.as_str();
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => parse_timestamp(value).map(|timestamp| timestamp.date_naive()),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_article() -> Article {
    Article {
        id: 7,
        attributes: ArticleAttributes {
            title: "Understanding Closures".to_owned(),
            description: "Closures in modern JavaScript".to_owned(),
            content: "# Closures\n\nA closure is...".to_owned(),
            slug: "understanding-closures".to_owned(),
            image: "/uploads/closures.png".to_owned(),
            created: "2023-04-02".to_owned(),
            created_at: "2023-04-02T10:15:00.000Z".to_owned(),
            updated_at: "2023-04-05T08:00:00.000Z".to_owned(),
            published_at: "2023-04-03T09:00:00+02:00".to_owned(),
            tags: vec!["javascript".to_owned(), "interview".to_owned()],
        },
    }
}
