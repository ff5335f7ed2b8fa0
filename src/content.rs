//! Portfolio content model
//!
//! The page text is data: a TOML document with the owner's name, the two
//! tagline rotations and an ordered list of sections made of blocks. A
//! built-in default is compiled into the binary; `--content` or
//! `FOLIO_CONTENT` points at a replacement file.

use crate::error::FolioError;
use crate::tracker::SectionId;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Content shipped with the binary
pub const DEFAULT_CONTENT: &str = include_str!("../content/default.toml");

/// Whole portfolio as loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub name: String,
    /// Rotation shown in the sidebar and the Home section
    pub taglines: Vec<String>,
    /// Independent rotation shown in the About section
    #[serde(default)]
    pub alt_taglines: Vec<String>,
    pub sections: Vec<SectionContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionContent {
    /// Anchor such as "about"; normalized into the section id "About"
    pub anchor: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl SectionContent {
    pub fn id(&self) -> SectionId {
        SectionId::from_anchor(&self.anchor)
    }
}

/// Which rotation a tagline block displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaglineSlot {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
    Tagline { slot: TaglineSlot },
    Facts { items: Vec<Fact> },
    Timeline { items: Vec<TimelineEntry> },
    Skills { items: Vec<Skill> },
    Cards { items: Vec<Card> },
    Links { items: Vec<Link> },
    Contact { email: String, phone: String },
    Actions { items: Vec<Action> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    pub percent: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// A button that scrolls to another section
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    pub label: String,
    pub key: char,
    pub target: String,
}

impl Portfolio {
    /// Load from `path`, or the built-in content when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let portfolio = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read content file {}", path.display()))?;
                Self::parse(&contents)
                    .with_context(|| format!("Invalid content file {}", path.display()))?
            }
            None => Self::parse(DEFAULT_CONTENT).context("Invalid built-in content")?,
        };
        Ok(portfolio)
    }

    /// Parse and validate a TOML document
    pub fn parse(toml_str: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(toml_str)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Structural checks that TOML typing cannot express
    pub fn validate(&self) -> Result<(), FolioError> {
        if self.sections.is_empty() {
            return Err(FolioError::NoSections);
        }
        if self.taglines.is_empty() {
            return Err(FolioError::EmptyTaglines);
        }

        let mut ids = HashSet::new();
        for (section, id) in self.sections.iter().zip(self.section_ids()) {
            if id.as_str().is_empty() {
                return Err(FolioError::BlankAnchor(section.title.clone()));
            }
            if !ids.insert(id.clone()) {
                return Err(FolioError::DuplicateSection(id.to_string()));
            }
        }

        for action in self.actions() {
            if !ids.contains(&SectionId::from_anchor(&action.target)) {
                return Err(FolioError::UnknownTarget {
                    action: action.label.clone(),
                    target: action.target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Section ids in page order
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(SectionContent::id).collect()
    }

    /// Secondary rotation, falling back to the primary one
    pub fn alt_taglines(&self) -> &[String] {
        if self.alt_taglines.is_empty() {
            &self.taglines
        } else {
            &self.alt_taglines
        }
    }

    /// Every action button on the page, in page order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter_map(|block| match block {
                Block::Actions { items } => Some(items.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Email address to copy: the contact block first, then an "Email" fact
    pub fn contact_email(&self) -> Option<&str> {
        let blocks = || self.sections.iter().flat_map(|s| s.blocks.iter());

        blocks()
            .find_map(|block| match block {
                Block::Contact { email, .. } => Some(email.as_str()),
                _ => None,
            })
            .or_else(|| {
                blocks().find_map(|block| match block {
                    Block::Facts { items } => items
                        .iter()
                        .find(|f| f.label.eq_ignore_ascii_case("email"))
                        .map(|f| f.value.as_str()),
                    _ => None,
                })
            })
    }
}
