use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::NormalizedPool;

/// Pool list tabs, each a filter over the classification flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    TopToday,
    Stable,
    Majors,
    New,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::TopToday => "Top today",
            Category::Stable => "Stable-ish",
            Category::Majors => "Majors",
            Category::New => "New",
        }
    }

    /// Whether a pool belongs in this tab
    pub fn matches(&self, pool: &NormalizedPool) -> bool {
        match self {
            Category::TopToday => true,
            Category::Stable => pool.is_stable,
            Category::Majors => pool.is_major,
            Category::New => pool.is_new,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" | "top-today" | "top today" | "all" => Ok(Category::TopToday),
            "stable" | "stable-ish" => Ok(Category::Stable),
            "majors" | "major" => Ok(Category::Majors),
            "new" => Ok(Category::New),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}
