//! Pre-assignment files, in the shape the videoconferencing platform's bulk
//! import expects.

use std::io::Write;

use crate::{
    allocate::{Allocation, AllocationRow},
    error::{Error, Result},
    validation::{is_single_line, is_valid_email},
};

/// The most rows the bulk import accepts in one file.
pub const MAX_BATCH_SIZE: usize = 200;

pub const HEADER: [&str; 2] = ["Pre-assign Room Name", "Email Address"];

/// The first `max` rows of an allocation, and whatever did not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    pub rows: &'a [AllocationRow],
    pub leftover: &'a [AllocationRow],
}

impl<'a> Batch<'a> {
    pub fn split(rows: &'a [AllocationRow], max: usize) -> Self {
        let (rows, leftover) = rows.split_at(max.min(rows.len()));
        Self { rows, leftover }
    }

    /// Serialises the batch, header first. Nothing is produced unless every
    /// row can be written.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;

        for row in self.rows {
            check_row(row)?;
            writer.write_record([&row.venue, &row.email])?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }

    pub fn write_csv(&self, mut out: impl Write) -> Result<()> {
        let bytes = self.to_csv()?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }
}

fn check_row(row: &AllocationRow) -> Result<()> {
    let reason = if row.venue.is_empty() {
        "empty room name"
    } else if !is_single_line(&row.venue) {
        "room name spans several lines"
    } else if !is_valid_email(&row.email) {
        "malformed email address"
    } else {
        return Ok(());
    };

    Err(Error::InvalidRow {
        row: (row.venue.clone(), row.email.clone()),
        reason,
    })
}

impl Allocation {
    pub fn batch(&self, max: usize) -> Batch<'_> {
        Batch::split(&self.rows, max)
    }
}

/// Writes the first [`MAX_BATCH_SIZE`] rows of `allocation` to `out` and
/// returns the rows which did not fit.
#[tracing::instrument(skip_all, fields(category = %allocation.category.name))]
pub fn write_batch(
    allocation: &Allocation,
    out: impl Write,
) -> Result<Vec<AllocationRow>> {
    let batch = allocation.batch(MAX_BATCH_SIZE);
    batch.write_csv(out)?;

    if !batch.leftover.is_empty() {
        tracing::warn!(
            "{} rows did not fit in the batch of {}",
            batch.leftover.len(),
            batch.rows.len()
        );
    }

    Ok(batch.leftover.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::rooms::Category;

    fn rows(n: usize) -> Vec<AllocationRow> {
        (0..n)
            .map(|i| {
                AllocationRow::new(
                    format!("Room {}", i / 10),
                    format!("p{i}@x.com"),
                )
            })
            .collect()
    }

    #[test]
    fn splits_at_the_cap() {
        for (len, max) in [(0, 200), (5, 200), (200, 200), (250, 200), (7, 3)] {
            let rows = rows(len);
            let batch = Batch::split(&rows, max);
            assert!(batch.rows.len() <= max);
            assert_eq!(batch.rows.len() + batch.leftover.len(), len);
            assert_eq!([batch.rows, batch.leftover].concat(), rows);
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let rows = vec![
            AllocationRow::new("Debate Room 3, Upper", "a@x.com"),
            AllocationRow::new("Debate Room 4", "b@x.com"),
        ];
        let csv = String::from_utf8(Batch::split(&rows, 200).to_csv().unwrap())
            .unwrap();

        assert_eq!(
            csv,
            "Pre-assign Room Name,Email Address\n\
             \"Debate Room 3, Upper\",a@x.com\n\
             Debate Room 4,b@x.com\n"
        );
    }

    #[test]
    fn two_hundred_and_fifty_rows() {
        let allocation = Allocation {
            category: Category::default(),
            rows: rows(250),
        };
        let mut out = Vec::new();

        let leftover = write_batch(&allocation, &mut out).unwrap();

        assert_eq!(leftover.len(), 50);
        assert_eq!(leftover[0].email, "p200@x.com");
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 201);
        assert!(text.lines().last().unwrap().ends_with("p199@x.com"));
    }

    #[test]
    fn keeps_duplicate_rows() {
        let rows = vec![
            AllocationRow::new("Room 1", "dup@x.com"),
            AllocationRow::new("Room 1", "dup@x.com"),
        ];
        let csv = Batch::split(&rows, 200).to_csv().unwrap();
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 3);
    }

    #[test]
    fn bad_rows_fail_the_whole_batch() {
        let rows = vec![
            AllocationRow::new("Room 1", "fine@x.com"),
            AllocationRow::new("Room 1", "a,b@x.com"),
        ];
        let mut out = Vec::new();

        let err = Batch::split(&rows, 200).write_csv(&mut out).unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidRow { reason: "malformed email address", .. }
        ));
        assert!(out.is_empty());

        let rows = vec![AllocationRow::new("Room\n1", "fine@x.com")];
        assert!(Batch::split(&rows, 200).to_csv().is_err());
    }
}
