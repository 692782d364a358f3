//! Course Catalog

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod fixtures;
pub mod price;

pub use price::{CATALOG_CURRENCY, CoursePrice, PriceError, format_price};

/// Course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u32> for CourseId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A course offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course id, unique within a catalog.
    pub id: CourseId,

    /// Display title.
    pub title: String,

    /// Difficulty level (e.g. "Beginner").
    pub level: String,

    /// Human readable duration (e.g. "12 hours").
    pub duration: String,

    /// Shelf price.
    pub price: CoursePrice,

    /// Optional catalog category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fixture file could not be read.
    #[error("Failed to read catalog fixture")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse catalog fixture: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two courses share the same id.
    #[error("Duplicate course id: {0}")]
    DuplicateCourse(CourseId),
}

/// Ordered, id-indexed collection of courses.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: FxHashMap<CourseId, usize>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCourse`] if two courses share an id.
    pub fn new(courses: impl Into<Vec<Course>>) -> Result<Self, CatalogError> {
        let courses = courses.into();
        let mut index = FxHashMap::default();

        for (position, course) in courses.iter().enumerate() {
            if index.insert(course.id, position).is_some() {
                return Err(CatalogError::DuplicateCourse(course.id));
            }
        }

        Ok(Self { courses, index })
    }

    /// Look up a course by id.
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.index
            .get(&id)
            .and_then(|position| self.courses.get(*position))
    }

    /// Iterate over courses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn course(id: u32, price: &str) -> Result<Course, PriceError> {
        Ok(Course {
            id: CourseId(id),
            title: format!("Course {id}"),
            level: "Beginner".to_string(),
            duration: "1 hour".to_string(),
            price: price.parse()?,
            category: None,
        })
    }

    #[test]
    fn get_returns_course_by_id() -> TestResult {
        let catalog = Catalog::new([course(1, "Free")?, course(2, "$10.00")?])?;

        let found = catalog.get(CourseId(2)).ok_or("course 2 missing")?;

        assert_eq!(found.title, "Course 2");
        assert!(catalog.get(CourseId(3)).is_none());

        Ok(())
    }

    #[test]
    fn new_rejects_duplicate_ids() -> TestResult {
        let result = Catalog::new([course(1, "Free")?, course(1, "$5.00")?]);

        assert!(
            matches!(result, Err(CatalogError::DuplicateCourse(CourseId(1)))),
            "expected DuplicateCourse, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn iter_preserves_order() -> TestResult {
        let catalog = Catalog::new([course(3, "Free")?, course(1, "Free")?, course(2, "Free")?])?;

        let ids: Vec<u32> = catalog.iter().map(|course| course.id.0).collect();

        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());

        Ok(())
    }
}
