use crate::analyzers::types::{CropAggregate, Tables, YearAggregate};
use crate::record::NormalizedRecord;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Insertion-ordered accumulator map. Rows come out in the order their key
/// was first seen, so the same input always yields the same tables.
struct OrderedFold<'a, A> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, A)>,
}

impl<'a, A> OrderedFold<'a, A> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Applies `update` to the accumulator for `key`, creating it with
    /// `init` on first sight.
    fn upsert(&mut self, key: &'a str, init: impl FnOnce() -> A, update: impl FnOnce(&mut A)) {
        let slot = match self.index.entry(key) {
            Entry::Occupied(slot) => *slot.get(),
            Entry::Vacant(slot) => {
                self.entries.push((key, init()));
                *slot.insert(self.entries.len() - 1)
            }
        };
        update(&mut self.entries[slot].1);
    }

    fn into_entries(self) -> Vec<(&'a str, A)> {
        self.entries
    }
}

/// Per-year and per-crop accumulators after the fold, keyed in
/// first-occurrence order.
#[derive(Debug)]
pub struct Accumulators<'a> {
    pub years: Vec<(&'a str, YearAggregate<'a>)>,
    pub crops: Vec<(&'a str, CropAggregate)>,
}

impl Accumulators<'_> {
    pub fn into_tables(self) -> Tables {
        Tables {
            year_table: self
                .years
                .into_iter()
                .map(|(year, agg)| agg.to_row(year))
                .collect(),
            crop_table: self
                .crops
                .into_iter()
                .map(|(crop, agg)| agg.to_row(crop))
                .collect(),
        }
    }
}

/// Single pass over the batch building both accumulator maps.
pub fn accumulate(records: &[NormalizedRecord]) -> Accumulators<'_> {
    let mut years: OrderedFold<'_, YearAggregate<'_>> = OrderedFold::new();
    let mut crops: OrderedFold<'_, CropAggregate> = OrderedFold::new();

    for record in records {
        years.upsert(
            &record.year,
            || YearAggregate::seed(record),
            |agg| agg.observe(record),
        );
        crops.upsert(&record.crop, CropAggregate::default, |agg| agg.add(record));
    }

    Accumulators {
        years: years.into_entries(),
        crops: crops.into_entries(),
    }
}

/// Folds a normalized batch into the per-year and per-crop tables.
///
/// The accumulators are dropped on return. An empty batch gives two empty
/// tables.
pub fn aggregate(records: &[NormalizedRecord]) -> Tables {
    accumulate(records).into_tables()
}
