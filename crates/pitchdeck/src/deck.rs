use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_DECK: &str = include_str!("../assets/deck.yaml");

/// One point of the revenue projection shown on the chart slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueDataPoint {
    pub month: u32,
    pub revenue: f64,
}

pub const REVENUE_DATA: [RevenueDataPoint; 5] = [
    RevenueDataPoint {
        month: 1,
        revenue: 139.94,
    },
    RevenueDataPoint {
        month: 3,
        revenue: 1019.57,
    },
    RevenueDataPoint {
        month: 6,
        revenue: 4997.95,
    },
    RevenueDataPoint {
        month: 9,
        revenue: 13794.45,
    },
    RevenueDataPoint {
        month: 12,
        revenue: 30987.50,
    },
];

/// Declarative description of a deck: slides and their content.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckLayout {
    pub title: String,
    pub slides: Vec<SlideSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideSpec {
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub bullets: Vec<String>,

    #[serde(default)]
    pub cards: Vec<CardSpec>,

    /// Marks the slide that hosts the revenue chart.
    #[serde(default)]
    pub chart: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardSpec {
    pub title: String,

    #[serde(default)]
    pub body: String,
}

impl DeckLayout {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_DECK).context("Built-in deck is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid deck {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let deck: DeckLayout = serde_yaml::from_str(contents)?;
        if deck.slides.is_empty() {
            anyhow::bail!("Deck has no slides");
        }
        let charts = deck.slides.iter().filter(|s| s.chart).count();
        if charts > 1 {
            anyhow::bail!("Deck marks {charts} slides as chart slides; at most one is allowed");
        }
        Ok(deck)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn chart_slide(&self) -> Option<usize> {
        self.slides.iter().position(|s| s.chart)
    }

    /// Every role the deck exposes, in paint order.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::new();
        for (i, slide) in self.slides.iter().enumerate() {
            roles.push(Role::Slide(i));
            roles.extend((0..slide.cards.len()).map(|c| Role::Card(i, c)));
        }
        roles.extend((0..self.slide_count()).map(Role::Indicator));
        roles.extend([
            Role::PrevControl,
            Role::NextControl,
            Role::CurrentSlide,
            Role::TotalSlides,
            Role::ProgressFill,
        ]);
        if self.chart_slide().is_some() {
            roles.push(Role::ChartSurface);
        }
        roles
    }
}

/// Logical UI role of an element on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Slide(usize),
    Indicator(usize),
    PrevControl,
    NextControl,
    CurrentSlide,
    TotalSlides,
    ProgressFill,
    ChartSurface,
    Card(usize, usize),
}

impl Role {
    /// Button-class controls get click ripples.
    pub fn is_button(self) -> bool {
        matches!(
            self,
            Role::Indicator(_) | Role::PrevControl | Role::NextControl
        )
    }

    /// Elements that lift on hover.
    pub fn is_interactive(self) -> bool {
        self.is_button() || matches!(self, Role::Card(..))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Slide(i) => write!(f, "slide-{i}"),
            Role::Indicator(i) => write!(f, "indicator-{i}"),
            Role::PrevControl => write!(f, "prev-control"),
            Role::NextControl => write!(f, "next-control"),
            Role::CurrentSlide => write!(f, "current-slide"),
            Role::TotalSlides => write!(f, "total-slides"),
            Role::ProgressFill => write!(f, "progress-fill"),
            Role::ChartSurface => write!(f, "chart-surface"),
            Role::Card(s, c) => write!(f, "card-{s}-{c}"),
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || format!("Invalid role: {s}");
        let role = match s {
            "prev-control" => Role::PrevControl,
            "next-control" => Role::NextControl,
            "current-slide" => Role::CurrentSlide,
            "total-slides" => Role::TotalSlides,
            "progress-fill" => Role::ProgressFill,
            "chart-surface" => Role::ChartSurface,
            _ => {
                if let Some(n) = s.strip_prefix("slide-") {
                    Role::Slide(n.parse().with_context(invalid)?)
                } else if let Some(n) = s.strip_prefix("indicator-") {
                    Role::Indicator(n.parse().with_context(invalid)?)
                } else if let Some(rest) = s.strip_prefix("card-") {
                    let (slide, card) = rest
                        .split_once('-')
                        .ok_or_else(|| anyhow::anyhow!(invalid()))?;
                    Role::Card(
                        slide.parse().with_context(invalid)?,
                        card.parse().with_context(invalid)?,
                    )
                } else {
                    anyhow::bail!("Unknown role: {s}");
                }
            }
        };
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_deck_parses() {
        let deck = DeckLayout::builtin().unwrap();
        assert_eq!(deck.slide_count(), 8);
        assert_eq!(deck.chart_slide(), Some(5));
    }

    #[test]
    fn test_builtin_roles_cover_every_slide() {
        let deck = DeckLayout::builtin().unwrap();
        let roles = deck.roles();
        for i in 0..deck.slide_count() {
            assert!(roles.contains(&Role::Slide(i)));
            assert!(roles.contains(&Role::Indicator(i)));
        }
        assert!(roles.contains(&Role::ChartSurface));
        assert!(roles.contains(&Role::ProgressFill));
    }

    #[test]
    fn test_deck_without_chart() {
        let deck = DeckLayout::parse("title: Tiny\nslides:\n  - title: Only\n").unwrap();
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.chart_slide(), None);
        assert!(!deck.roles().contains(&Role::ChartSurface));
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(DeckLayout::parse("title: Empty\nslides: []\n").is_err());
    }

    #[test]
    fn test_two_chart_slides_rejected() {
        let yaml = "title: Twice\nslides:\n  - title: A\n    chart: true\n  - title: B\n    chart: true\n";
        let err = DeckLayout::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("at most one"));
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Indicator(3).to_string(), "indicator-3");
        assert_eq!(Role::Card(2, 1).to_string(), "card-2-1");
        assert_eq!("next-control".parse::<Role>().unwrap(), Role::NextControl);
        assert_eq!("indicator-3".parse::<Role>().unwrap(), Role::Indicator(3));
        assert_eq!("card-4-0".parse::<Role>().unwrap(), Role::Card(4, 0));
        assert!("indicator-x".parse::<Role>().is_err());
        assert!("sidebar".parse::<Role>().is_err());
    }

    #[test]
    fn test_revenue_data_is_ordered() {
        assert!(REVENUE_DATA.windows(2).all(|w| w[0].month < w[1].month));
        assert!(REVENUE_DATA.iter().all(|p| p.month >= 1 && p.revenue >= 0.0));
    }
}
