use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::errors::PagescopeError;

/// The category scored for every target in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    #[default]
    Performance,
    Accessibility,
    BestPractices,
    Seo,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Performance,
        Metric::Accessibility,
        Metric::BestPractices,
        Metric::Seo,
    ];

    /// Key used for this metric under `lighthouseResult.categories`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Accessibility => "accessibility",
            Self::BestPractices => "best-practices",
            Self::Seo => "seo",
        }
    }

    /// Value of the `category` query parameter understood by the scoring API.
    pub fn api_category(&self) -> &'static str {
        match self {
            Self::Performance => "PERFORMANCE",
            Self::Accessibility => "ACCESSIBILITY",
            Self::BestPractices => "BEST_PRACTICES",
            Self::Seo => "SEO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Accessibility => "Accessibility",
            Self::BestPractices => "Best Practices",
            Self::Seo => "SEO",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = PagescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| PagescopeError::Config(format!(
                "Unknown metric '{}': expected one of performance, accessibility, best-practices, seo",
                s
            )))
    }
}
