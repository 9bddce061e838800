use shapes_kernel::{CountTable, PopulationError, PopulationStore};

/// Which end of the count distribution an extremal query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Max,
    Min,
}

/// Values whose count exceeds the baseline value's count by more than
/// `tolerance`, in table order.
pub fn overrepresented<'a>(table: &'a CountTable, baseline: &str, tolerance: u32) -> Vec<&'a str> {
    let limit = table.get(baseline) + tolerance as usize;
    table
        .iter()
        .filter(|(_, count)| *count > limit)
        .map(|(key, _)| key)
        .collect()
}

/// The value with the highest or lowest count.
///
/// Ties go to the value that comes first in the table, so an all-equal table
/// yields its first entry.
pub fn extremal(table: &CountTable, direction: Direction) -> Result<&str, PopulationError> {
    if table.total() == 0 {
        return Err(PopulationError::EmptyPopulation);
    }
    let mut entries = table.iter();
    let Some(mut best) = entries.next() else {
        return Err(PopulationError::EmptyPopulation);
    };
    if all_equal(table) {
        return Ok(best.0);
    }
    for entry in entries {
        let better = match direction {
            Direction::Max => entry.1 > best.1,
            Direction::Min => entry.1 < best.1,
        };
        if better {
            best = entry;
        }
    }
    Ok(best.0)
}

/// True when every value has the same count.
pub fn all_equal(table: &CountTable) -> bool {
    let mut counts = table.iter().map(|(_, n)| n);
    match counts.next() {
        Some(first) => counts.all(|n| n == first),
        None => true,
    }
}

/// Kind and color queries over one consistent pair of count tables.
#[derive(Debug, Clone, Copy)]
pub struct BalanceAnalyzer<'a> {
    kinds: &'a CountTable,
    colors: &'a CountTable,
    tolerance: u32,
}

impl<'a> BalanceAnalyzer<'a> {
    /// Analyze the store's current tables. Callers refresh them first.
    pub fn new(store: &'a PopulationStore, tolerance: u32) -> Self {
        Self::from_tables(store.kind_counts(), store.color_counts(), tolerance)
    }

    pub fn from_tables(kinds: &'a CountTable, colors: &'a CountTable, tolerance: u32) -> Self {
        Self {
            kinds,
            colors,
            tolerance,
        }
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    pub fn overrepresented_kinds(&self, baseline: &str) -> Vec<&'a str> {
        overrepresented(self.kinds, baseline, self.tolerance)
    }

    pub fn overrepresented_colors(&self, baseline: &str) -> Vec<&'a str> {
        overrepresented(self.colors, baseline, self.tolerance)
    }

    pub fn extremal_kind(&self, direction: Direction) -> Result<&'a str, PopulationError> {
        extremal(self.kinds, direction)
    }

    pub fn extremal_color(&self, direction: Direction) -> Result<&'a str, PopulationError> {
        extremal(self.colors, direction)
    }

    /// Gap between the largest and smallest color counts.
    pub fn color_skew(&self) -> usize {
        skew(self.colors)
    }

    /// Gap between the largest and smallest kind counts.
    pub fn kind_skew(&self) -> usize {
        skew(self.kinds)
    }
}

fn skew(table: &CountTable) -> usize {
    let max = table.iter().map(|(_, n)| n).max().unwrap_or(0);
    let min = table.iter().map(|(_, n)| n).min().unwrap_or(0);
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_common::Attribute;

    fn table(counts: &[(&'static str, usize)]) -> CountTable {
        CountTable::from_counts(Attribute::Kind, counts.iter().copied())
    }

    #[test]
    fn overrepresented_is_strictly_beyond_tolerance() {
        let t = table(&[("Cube", 3), ("Sphere", 4), ("Cone", 5)]);
        assert_eq!(overrepresented(&t, "Cube", 1), ["Cone"]);
        assert_eq!(overrepresented(&t, "Cube", 0), ["Sphere", "Cone"]);
        assert!(overrepresented(&t, "Cube", 2).is_empty());
    }

    #[test]
    fn values_below_baseline_are_not_flagged() {
        let t = table(&[("Cube", 0), ("Sphere", 6)]);
        assert!(overrepresented(&t, "Sphere", 1).is_empty());
        assert_eq!(overrepresented(&t, "Cube", 1), ["Sphere"]);
    }

    #[test]
    fn extremal_picks_max_and_min() {
        let t = table(&[("Cube", 2), ("Sphere", 7), ("Cone", 1)]);
        assert_eq!(extremal(&t, Direction::Max).unwrap(), "Sphere");
        assert_eq!(extremal(&t, Direction::Min).unwrap(), "Cone");
    }

    #[test]
    fn extremal_ties_favor_earlier_value() {
        let t = table(&[("Cube", 1), ("Sphere", 4), ("Cone", 4), ("Torus", 1)]);
        assert_eq!(extremal(&t, Direction::Max).unwrap(), "Sphere");
        assert_eq!(extremal(&t, Direction::Min).unwrap(), "Cube");
    }

    #[test]
    fn all_equal_yields_first_entry() {
        let t = table(&[("Cube", 3), ("Sphere", 3)]);
        assert!(all_equal(&t));
        assert_eq!(extremal(&t, Direction::Max).unwrap(), "Cube");
        assert_eq!(extremal(&t, Direction::Min).unwrap(), "Cube");
    }

    #[test]
    fn zero_counts_can_be_minimal() {
        let t = table(&[("Cube", 5), ("Sphere", 0)]);
        assert!(!all_equal(&t));
        assert_eq!(extremal(&t, Direction::Min).unwrap(), "Sphere");
    }

    #[test]
    fn extremal_on_empty_population_is_an_error() {
        let t = table(&[("Cube", 0), ("Sphere", 0)]);
        assert_eq!(
            extremal(&t, Direction::Max).unwrap_err(),
            PopulationError::EmptyPopulation
        );
        let none = table(&[]);
        assert_eq!(
            extremal(&none, Direction::Min).unwrap_err(),
            PopulationError::EmptyPopulation
        );
    }

    #[test]
    fn extremal_is_deterministic() {
        let t = table(&[("A", 2), ("B", 9), ("C", 9), ("D", 0), ("E", 0)]);
        let first = (
            extremal(&t, Direction::Max).unwrap(),
            extremal(&t, Direction::Min).unwrap(),
        );
        for _ in 0..50 {
            assert_eq!(extremal(&t, Direction::Max).unwrap(), first.0);
            assert_eq!(extremal(&t, Direction::Min).unwrap(), first.1);
        }
        assert_eq!(first, ("B", "D"));
    }

    #[test]
    fn analyzer_splits_kind_and_color_queries() {
        let kinds = table(&[("Cube", 1), ("Sphere", 4)]);
        let colors = CountTable::from_counts(Attribute::Color, [("Red", 3), ("Blue", 2)]);
        let a = BalanceAnalyzer::from_tables(&kinds, &colors, 1);
        assert_eq!(a.overrepresented_kinds("Cube"), ["Sphere"]);
        assert!(a.overrepresented_colors("Blue").is_empty());
        assert_eq!(a.extremal_color(Direction::Max).unwrap(), "Red");
        assert_eq!(a.extremal_kind(Direction::Min).unwrap(), "Cube");
        assert_eq!(a.kind_skew(), 3);
        assert_eq!(a.color_skew(), 1);
    }
}
