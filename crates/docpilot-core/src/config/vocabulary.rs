//! Topic vocabulary for rule-based tagging

use serde::{Deserialize, Serialize};

/// A tag category and the keywords that signal it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCategory {
    /// Tag emitted when the category matches
    pub name: String,
    /// Whole-word keywords; entries containing spaces match as phrases
    pub keywords: Vec<String>,
}

impl TagCategory {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Built-in vocabulary, in tie-break order
pub fn default_tag_categories() -> Vec<TagCategory> {
    vec![
        TagCategory::new(
            "Technology",
            &[
                "software",
                "system",
                "systems",
                "development",
                "technical",
                "code",
                "programming",
                "api",
                "database",
                "storage",
                "search",
                "auth",
                "authentication",
                "server",
                "feature",
                "features",
                "release",
            ],
        ),
        TagCategory::new(
            "Business",
            &[
                "project",
                "company",
                "business",
                "management",
                "strategy",
                "organization",
                "team",
            ],
        ),
        TagCategory::new(
            "Finance",
            &[
                "budget",
                "cost",
                "costs",
                "financial",
                "money",
                "expense",
                "revenue",
                "payment",
                "invoice",
            ],
        ),
        TagCategory::new(
            "Education",
            &[
                "learning",
                "study",
                "course",
                "education",
                "training",
                "academic",
                "school",
            ],
        ),
        TagCategory::new(
            "Health",
            &[
                "medical",
                "health",
                "doctor",
                "patient",
                "treatment",
                "medicine",
                "hospital",
            ],
        ),
        TagCategory::new(
            "Legal",
            &["legal", "law", "contract", "agreement", "attorney", "court"],
        ),
        TagCategory::new(
            "Marketing",
            &[
                "marketing",
                "advertising",
                "campaign",
                "promotion",
                "brand",
                "customer",
            ],
        ),
        TagCategory::new(
            "Research",
            &[
                "research",
                "study",
                "analysis",
                "data",
                "investigation",
                "survey",
            ],
        ),
        TagCategory::new(
            "Project Management",
            &[
                "project",
                "planning",
                "schedule",
                "milestone",
                "deliverable",
                "roadmap",
            ],
        ),
        TagCategory::new(
            "Documentation",
            &[
                "document",
                "report",
                "file",
                "record",
                "documentation",
                "manual",
            ],
        ),
    ]
}
