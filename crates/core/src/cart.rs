//! Cart Store
//!
//! In-memory line items, the cart surface's visibility flag and the history of
//! completed purchases. Nothing here is persisted.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    catalog::{CATALOG_CURRENCY, Course, CourseId, PriceError},
    learning::LearningHistory,
};

/// A course in the cart along with how many seats are being bought.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Catalog course.
    pub course: Course,

    /// Always at least one while the line is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// A single seat of `course`.
    pub fn new(course: Course) -> Self {
        Self {
            course,
            quantity: 1,
        }
    }

    /// Id of the underlying course.
    pub fn id(&self) -> CourseId {
        self.course.id
    }

    /// Price of the line in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the total does not fit.
    pub fn line_total(&self) -> Result<i64, PriceError> {
        self.course.price.times(self.quantity)
    }

    /// Line total as shown to the user: "Free" or "$12.50".
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the total does not fit.
    pub fn display_total(&self) -> Result<String, PriceError> {
        if self.course.price.is_free() {
            return Ok(self.course.price.to_string());
        }

        Ok(crate::catalog::format_price(
            self.line_total()?,
            CATALOG_CURRENCY.iso_alpha_code,
        ))
    }
}

impl From<Course> for LineItem {
    fn from(course: Course) -> Self {
        Self::new(course)
    }
}

/// Cart contents and purchase history.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    open: bool,
    history: LearningHistory,
}

impl CartStore {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one seat of `course`. Returns `false` when the course is already in the
    /// cart, in which case nothing changes.
    pub fn add_item(&mut self, course: Course) -> bool {
        self.add_line(LineItem::new(course))
    }

    /// Add a whole line, keeping its quantity. Same uniqueness rule as
    /// [`CartStore::add_item`].
    pub fn add_line(&mut self, line: LineItem) -> bool {
        if self.contains(line.id()) {
            debug!(course_id = %line.id(), "course already in cart");

            return false;
        }

        let quantity = line.quantity.max(1);

        debug!(course_id = %line.id(), quantity, "added course to cart");

        self.items.push(LineItem { quantity, ..line });

        true
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: CourseId) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.id() != id);

        let removed = self.items.len() != before;

        if removed {
            debug!(course_id = %id, "removed course from cart");
        }

        removed
    }

    /// Overwrite the quantity of the line for `id`; zero removes it. Returns whether
    /// the cart changed.
    pub fn set_quantity(&mut self, id: CourseId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }

        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.quantity = quantity;

                true
            }
            None => false,
        }
    }

    /// Whether a line exists for `id`.
    pub fn contains(&self, id: CourseId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Owned copy of the current lines.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals; free courses count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the total does not fit.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, PriceError> {
        let minor_units = self.items.iter().try_fold(0_i64, |total, item| {
            total
                .checked_add(item.line_total()?)
                .ok_or(PriceError::Overflow)
        })?;

        Ok(Money::from_minor(minor_units, CATALOG_CURRENCY))
    }

    /// Sum of quantities across all lines (the header badge count).
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the cart surface is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the cart surface.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Record `items` as purchased at `purchased_at`. The cart itself is not
    /// cleared.
    pub fn complete_purchase(&mut self, items: &[LineItem], purchased_at: Timestamp) {
        self.history.record(items, purchased_at);
    }

    /// Completed purchases, oldest first.
    pub fn history(&self) -> &LearningHistory {
        &self.history
    }
}
