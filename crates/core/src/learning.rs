//! Learning History

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::LineItem;

/// How far a learner has got through a purchased course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseStatus {
    /// Purchased, never opened.
    NotStarted,

    /// Some lessons completed.
    InProgress,

    /// Every lesson completed.
    Completed,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        })
    }
}

/// A purchased line, frozen at the moment of purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchasedCourse {
    /// Line as it was in the cart.
    pub line: LineItem,

    /// When the purchase completed.
    pub purchase_date: Timestamp,

    /// Percentage complete, 0 to 100.
    pub progress: u8,

    /// Learner status.
    pub status: CourseStatus,
}

impl PurchasedCourse {
    /// Snapshot `line` as a fresh purchase.
    pub fn new(line: LineItem, purchase_date: Timestamp) -> Self {
        Self {
            line,
            purchase_date,
            progress: 0,
            status: CourseStatus::NotStarted,
        }
    }
}

/// Tabs on the learning page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LearningTab {
    /// Every purchase.
    #[default]
    All,

    /// Only courses with the matching status.
    Status(CourseStatus),
}

/// Unknown learning tab name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown learning tab: {0}")]
pub struct UnknownTab(pub String);

impl FromStr for LearningTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "not-started" => Ok(Self::Status(CourseStatus::NotStarted)),
            "in-progress" => Ok(Self::Status(CourseStatus::InProgress)),
            "completed" => Ok(Self::Status(CourseStatus::Completed)),
            other => Err(UnknownTab(other.to_string())),
        }
    }
}

/// Counts shown above the learning history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearningStats {
    /// Every purchase.
    pub total: usize,

    /// Purchases in progress.
    pub in_progress: usize,

    /// Purchases completed.
    pub completed: usize,
}

/// Append-only record of purchases.
#[derive(Debug, Clone, Default)]
pub struct LearningHistory {
    courses: Vec<PurchasedCourse>,
}

impl LearningHistory {
    /// Append one purchase per line.
    pub fn record(&mut self, items: &[LineItem], purchase_date: Timestamp) {
        self.courses.extend(
            items
                .iter()
                .cloned()
                .map(|line| PurchasedCourse::new(line, purchase_date)),
        );
    }

    /// Purchases matching `tab` whose title or category contains `search`,
    /// ignoring case. An empty search matches everything.
    pub fn filter<'a>(
        &'a self,
        tab: LearningTab,
        search: &'a str,
    ) -> impl Iterator<Item = &'a PurchasedCourse> + 'a {
        let needle = search.trim().to_lowercase();

        self.courses.iter().filter(move |purchase| {
            let tab_matches = match tab {
                LearningTab::All => true,
                LearningTab::Status(status) => purchase.status == status,
            };

            tab_matches && matches_search(purchase, &needle)
        })
    }

    /// Totals by status.
    pub fn stats(&self) -> LearningStats {
        self.courses
            .iter()
            .fold(LearningStats::default(), |mut stats, purchase| {
                stats.total += 1;

                match purchase.status {
                    CourseStatus::InProgress => stats.in_progress += 1,
                    CourseStatus::Completed => stats.completed += 1,
                    CourseStatus::NotStarted => {}
                }

                stats
            })
    }

    /// Purchases, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PurchasedCourse> {
        self.courses.iter()
    }

    /// Number of purchases.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether nothing has been purchased.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn matches_search(purchase: &PurchasedCourse, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let course = &purchase.line.course;

    course.title.to_lowercase().contains(needle)
        || course
            .category
            .as_deref()
            .is_some_and(|category| category.to_lowercase().contains(needle))
}
