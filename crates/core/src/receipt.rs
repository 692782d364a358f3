//! Receipt
//!
//! Plain-text tables for the catalog, the cart and the learning history.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::CartStore,
    catalog::{Catalog, PriceError, format_price},
    learning::{LearningStats, PurchasedCourse},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line or cart total could not be computed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Writing to the output failed.
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Write every course in the catalog as a table.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the write fails.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Course", "Category", "Level", "Duration", "Price"]);

    for course in catalog.iter() {
        builder.push_record([
            course.id.to_string(),
            course.title.clone(),
            course.category.clone().unwrap_or_default(),
            course.level.clone(),
            course.duration.clone(),
            course.price.to_string(),
        ]);
    }

    write_table(&mut out, builder, 5..6)
}

/// Write the cart as a table followed by the item count and total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if a total overflows or the write fails.
pub fn write_cart(mut out: impl io::Write, cart: &CartStore) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Course", "Level", "Duration", "Price", "Qty", "Total"]);

    for (idx, line) in cart.items().iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.course.title.clone(),
            line.course.level.clone(),
            line.course.duration.clone(),
            line.course.price.to_string(),
            line.quantity.to_string(),
            line.display_total()?,
        ]);
    }

    write_table(&mut out, builder, 4..7)?;

    writeln!(out, " Items: {}", cart.total_item_count())?;
    let total = cart.total_price()?;

    writeln!(
        out,
        " Total: {}",
        format_price(total.to_minor_units(), total.currency().iso_alpha_code)
    )?;

    Ok(())
}

/// Write purchases as a table followed by the status counts.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the write fails.
pub fn write_learning<'a>(
    mut out: impl io::Write,
    purchases: impl IntoIterator<Item = &'a PurchasedCourse>,
    stats: LearningStats,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Course", "Category", "Purchased", "Progress", "Status"]);

    let mut rows = 0_usize;

    for purchase in purchases {
        rows += 1;

        let course = &purchase.line.course;

        builder.push_record([
            format!("#{rows:<3}"),
            course.title.clone(),
            course.category.clone().unwrap_or_default(),
            purchase.purchase_date.strftime("%Y-%m-%d").to_string(),
            format!("{}%", purchase.progress),
            purchase.status.to_string(),
        ]);
    }

    if rows == 0 {
        writeln!(out, "No courses found")?;
    } else {
        write_table(&mut out, builder, 4..5)?;
    }

    writeln!(
        out,
        " Total Courses: {}  In Progress: {}  Completed: {}",
        stats.total, stats.in_progress, stats.completed
    )?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: std::ops::Range<usize>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(right_aligned), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}
