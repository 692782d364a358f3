//! Catalog Fixtures

use std::{fs, path::Path};

use serde::Deserialize;

use super::{Catalog, CatalogError, Course};

/// Courses bundled with the crate.
pub const DEMO_CATALOG: &str = include_str!("../../fixtures/courses/demo.yml");

/// Wrapper for courses in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Courses in display order
    pub courses: Vec<Course>,
}

/// Parse catalog fixture content into a [`Catalog`].
///
/// # Errors
///
/// Returns an error when the YAML is malformed, a price cannot be parsed, or two
/// courses share an id.
pub fn load_catalog(yaml: &str) -> Result<Catalog, CatalogError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    Catalog::new(fixture.courses)
}

/// Read and parse a catalog fixture file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
/// [`load_catalog`].
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path)?;

    load_catalog(&contents)
}

/// The bundled demo catalog.
///
/// # Errors
///
/// As [`load_catalog`].
pub fn demo_catalog() -> Result<Catalog, CatalogError> {
    load_catalog(DEMO_CATALOG)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::{CourseId, CoursePrice};

    use super::*;

    const YAML: &str = r#"
courses:
  - id: 1
    title: Complete JavaScript Mastery
    level: Intermediate
    duration: 12 hours
    price: "$49.99"
    category: Programming
  - id: 2
    title: React.js Fundamentals
    level: Beginner
    duration: 8 hours
    price: Free
"#;

    #[test]
    fn load_catalog_parses_courses() -> TestResult {
        let catalog = load_catalog(YAML)?;

        assert_eq!(catalog.len(), 2);

        let javascript = catalog.get(CourseId(1)).ok_or("course 1 missing")?;

        assert_eq!(javascript.price, CoursePrice::from_minor(4999));
        assert_eq!(javascript.category.as_deref(), Some("Programming"));

        let react = catalog.get(CourseId(2)).ok_or("course 2 missing")?;

        assert!(react.price.is_free());
        assert!(react.category.is_none());

        Ok(())
    }

    #[test]
    fn demo_catalog_loads() -> TestResult {
        let catalog = demo_catalog()?;

        assert_eq!(catalog.len(), 6);
        assert_eq!(
            catalog.get(CourseId(3)).map(|course| course.price),
            Some(CoursePrice::from_minor(39_00))
        );

        Ok(())
    }

    #[test]
    fn load_catalog_file_reports_missing_file() {
        let result = load_catalog_file("does/not/exist.yml");

        assert!(
            matches!(result, Err(CatalogError::Io(_))),
            "expected Io error, got {result:?}"
        );
    }

    #[test]
    fn load_catalog_rejects_bad_price() {
        let yaml = r"
courses:
  - id: 1
    title: Broken
    level: Beginner
    duration: 1 hour
    price: twelve
";

        assert!(matches!(load_catalog(yaml), Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn load_catalog_rejects_duplicate_ids() {
        let yaml = r"
courses:
  - { id: 7, title: A, level: Beginner, duration: 1 hour, price: Free }
  - { id: 7, title: B, level: Beginner, duration: 1 hour, price: Free }
";

        assert!(matches!(
            load_catalog(yaml),
            Err(CatalogError::DuplicateCourse(CourseId(7)))
        ));
    }
}
