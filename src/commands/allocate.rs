use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Args;
use itertools::Itertools;
use preassign::{
    allocate::{
        Allocation, AllocationRow, Batch, IdentitySource, MAX_BATCH_SIZE,
        NameLookup, allocate, leftovers, reconcile,
    },
    resolve::ResolutionMap,
    tournaments::rooms::Categories,
    zoom::RegistrantNames,
};

use crate::commands::{load_pairings, load_registrants, load_venues, open_store};

#[derive(Debug, Args)]
pub struct AllocateCommand {
    /// Venues export (`/api/v1/tournaments/<slug>/venues`).
    #[arg(long)]
    venues: PathBuf,

    /// Pairings of the round(s) to allocate.
    #[arg(long, num_args = 1.., required = true)]
    pairings: Vec<PathBuf>,

    /// Room categories, as TOML. Without one every room is uncategorised.
    #[arg(long)]
    categories: Option<PathBuf>,

    /// A resolution map from `resolve`. Without one, emails come from the
    /// participant store.
    #[arg(long)]
    resolution: Option<PathBuf>,

    /// Registrant exports, used to name the people who did not fit.
    #[arg(long, num_args = 1..)]
    registrants: Vec<PathBuf>,

    /// Prefix of the written files.
    #[arg(long, default_value = "round")]
    name: String,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Write rows which do not fit into extra numbered files instead of
    /// listing them for manual assignment.
    #[arg(long, action)]
    continuation: bool,
}

/// Used when nothing can put a name to an email.
struct NoNames;

impl NameLookup for NoNames {
    fn name_for_email(
        &mut self,
        _email: &str,
    ) -> preassign::Result<Option<String>> {
        Ok(None)
    }
}

impl AllocateCommand {
    pub fn run(self, db: &str) -> Result<()> {
        let venues = load_venues(&self.venues)?;
        let rooms = load_pairings(&self.pairings)?;
        let categories = match &self.categories {
            Some(path) => Categories::load(path).with_context(|| {
                format!("could not load categories from {}", path.display())
            })?,
            None => Categories::default(),
        };

        let mut identities: Box<dyn IdentitySource> = match &self.resolution {
            Some(path) => Box::new(ResolutionMap::load(path).with_context(
                || format!("could not load resolution map {}", path.display()),
            )?),
            None => Box::new(open_store(db)?),
        };

        let allocations =
            allocate(&mut *identities, &venues, &rooms, &categories)?;
        let leftover = write_allocations(
            &allocations,
            &self.name,
            &self.out_dir,
            self.continuation,
        )?;

        if leftover.is_empty() {
            return Ok(());
        }

        let report = if !self.registrants.is_empty() {
            let registrants = load_registrants(&self.registrants)?;
            reconcile(&leftover, RegistrantNames::new(&registrants))
        } else if self.resolution.is_none() || Path::new(db).exists() {
            reconcile(&leftover, open_store(db)?)
        } else {
            reconcile(&leftover, NoNames)
        };

        println!(
            "{} participants must be assigned to their rooms by hand:\n{}",
            report.len(),
            leftovers::render(&report)
        );
        Ok(())
    }
}

/// `Debate Rooms (A)` becomes `debate-rooms-a`.
fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .join("-")
}

/// One stem per allocation, distinct from one another. Categories whose
/// names have no usable characters, or slug the same as an earlier one, are
/// told apart by their position in the category file.
fn file_stems(name: &str, allocations: &[Allocation]) -> Vec<String> {
    let mut taken = HashSet::new();
    allocations
        .iter()
        .enumerate()
        .map(|(position, allocation)| {
            let base = if allocation.category.is_uncategorised() {
                name.to_string()
            } else {
                match slug(&allocation.category.name) {
                    slug if slug.is_empty() => {
                        format!("{name}-category-{}", position + 1)
                    }
                    slug => format!("{name}-{slug}"),
                }
            };

            let mut stem = base.clone();
            let mut n = position + 1;
            while !taken.insert(stem.clone()) {
                stem = format!("{base}-category-{n}");
                n += 1;
            }
            stem
        })
        .collect()
}

/// Writes `batch` to `path`, refusing to replace a file written earlier in
/// the same run.
fn write_file(
    path: PathBuf,
    batch: &Batch,
    written: &mut HashSet<PathBuf>,
) -> Result<()> {
    if written.contains(&path) {
        bail!("{} would be written twice", path.display());
    }
    std::fs::write(&path, batch.to_csv()?)
        .with_context(|| format!("could not write {}", path.display()))?;
    println!("Wrote {} rows to {}", batch.rows.len(), path.display());
    written.insert(path);
    Ok(())
}

/// Writes one file per non-empty allocation and returns the rows which did
/// not fit, unless `continuation` spills them into numbered files.
fn write_allocations(
    allocations: &[Allocation],
    name: &str,
    out_dir: &Path,
    continuation: bool,
) -> Result<Vec<AllocationRow>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;

    let stems = file_stems(name, allocations);
    let mut written = HashSet::new();
    let mut leftover = Vec::new();
    for (allocation, stem) in allocations.iter().zip(&stems) {
        if allocation.is_empty() {
            continue;
        }
        let batch = allocation.batch(MAX_BATCH_SIZE);
        write_file(out_dir.join(format!("{stem}.csv")), &batch, &mut written)?;

        if !continuation {
            leftover.extend_from_slice(batch.leftover);
            continue;
        }

        let mut rest = batch.leftover;
        let mut part = 2;
        while !rest.is_empty() {
            let batch = Batch::split(rest, MAX_BATCH_SIZE);
            let path = out_dir.join(format!("{stem}-{part}.csv"));
            write_file(path, &batch, &mut written)?;
            rest = batch.leftover;
            part += 1;
        }
    }

    Ok(leftover)
}
