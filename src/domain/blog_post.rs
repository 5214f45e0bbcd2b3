use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A blog entry after normalization. Every field is always populated.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Always HTML.
    pub content: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub featured: bool,
    pub slug: String,
}

impl BlogPost {
    /// `date` formatted for humans, or left as-is when it is not a date.
    pub fn display_date(&self) -> String {
        if let Ok(datetime) = DateTime::parse_from_rfc3339(&self.date) {
            return datetime.format("%B %-d, %Y").to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            return date.format("%B %-d, %Y").to_string();
        }
        self.date.clone()
    }

    fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Blog list query: `?category=Leadership&q=growth`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PostFilter {
    pub category: Option<String>,
    #[serde(rename = "q")]
    pub search: Option<String>,
}

pub const ALL_CATEGORIES: &str = "All";

impl PostFilter {
    fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn is_empty(&self) -> bool {
        self.category().is_none() && self.search().is_none()
    }

    pub fn selected_category(&self) -> &str {
        self.category().unwrap_or(ALL_CATEGORIES)
    }

    pub fn search_term(&self) -> String {
        self.search.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        let matches_category = self.category().map_or(true, |c| post.category == c);
        let matches_search = self.search().map_or(true, |s| post.mentions(&s));
        matches_category && matches_search
    }

    pub fn apply<'a>(&self, posts: &'a [BlogPost]) -> Vec<&'a BlogPost> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

/// `All` followed by every category in first-seen order.
pub fn categories(posts: &[BlogPost]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for post in posts {
        if !categories.contains(&post.category) {
            categories.push(post.category.clone());
        }
    }
    categories
}
