//! Profile - Stunt performer directory record
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile - A stunt performer's directory record
///
/// Owned by the backing store. Embedding generation only reads the textual
/// attributes and replaces the embedding columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub biography: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    /// Semantic vector of the text as it was when last computed
    pub embedding: Option<Vec<f32>>,
    pub embedding_updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Create a profile with no embedding yet
    pub fn new(
        id: Uuid,
        biography: Option<String>,
        skills: Vec<String>,
        experience: Option<String>,
    ) -> Self {
        Self {
            id,
            biography,
            skills,
            experience,
            embedding: None,
            embedding_updated_at: None,
        }
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    /// Whether any attribute carries text worth embedding
    pub fn has_text(&self) -> bool {
        non_blank(self.biography.as_deref()).is_some()
            || self.skills.iter().any(|s| !s.trim().is_empty())
            || non_blank(self.experience.as_deref()).is_some()
    }

    /// Text sent to the embedding provider.
    ///
    /// One labelled line per non-blank attribute. `None` when there is
    /// nothing to embed.
    pub fn embedding_input(&self) -> Option<String> {
        let mut lines = Vec::with_capacity(3);

        if let Some(bio) = non_blank(self.biography.as_deref()) {
            lines.push(format!("Biography: {}", bio));
        }

        let skills: Vec<&str> = self
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if !skills.is_empty() {
            lines.push(format!("Skills: {}", skills.join(", ")));
        }

        if let Some(experience) = non_blank(self.experience.as_deref()) {
            lines.push(format!("Experience: {}", experience));
        }

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
