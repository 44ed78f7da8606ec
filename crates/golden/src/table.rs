//! The versioned table of goldens
//!
//! Names, texts, sizes and canvases here are mirrored by the comparison
//! harness's own test table. Changing a row without changing it there breaks
//! visual-regression runs without any error on either side.

use std::collections::HashSet;

use golden_core::{
    error::{GoldenError, Result},
    types::GoldenSpec,
};
use golden_fontdb::ResolvedFonts;

/// An ordered, validated list of golden specs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTable {
    specs: Vec<GoldenSpec>,
}

impl SpecTable {
    /// Validates `specs`: every spec well-formed, no name used twice
    pub fn new(specs: Vec<GoldenSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &specs {
            spec.validate()?;
            if !seen.insert(spec.name.as_str()) {
                return Err(GoldenError::InvalidSpec(format!(
                    "duplicate golden name {:?}",
                    spec.name
                )));
            }
        }
        Ok(Self { specs })
    }

    /// The standard table, drawn with the fonts resolved at startup
    pub fn standard(fonts: &ResolvedFonts) -> Self {
        let mono = &fonts.mono;
        let serif = &fonts.serif;
        Self {
            specs: vec![
                GoldenSpec::new("golden_document_22px_mono", "document", 22, 250, 60, mono),
                GoldenSpec::new("golden_mm_22px_mono", "mm", 22, 100, 50, mono),
                GoldenSpec::new("golden_hello_15px_mono", "Hello, World!", 15, 200, 40, mono),
                GoldenSpec::new("golden_av_22px_serif", "AV", 22, 100, 50, serif),
                GoldenSpec::new("golden_code_15px_mono", "fn main() {", 15, 200, 40, mono),
            ],
        }
    }

    /// Specs whose name contains any of `filters`, in table order
    pub fn select<S: AsRef<str>>(&self, filters: &[S]) -> Vec<&GoldenSpec> {
        select_specs(&self.specs, filters)
    }

    pub fn get(&self, name: &str) -> Option<&GoldenSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GoldenSpec> {
        self.specs.iter()
    }

    pub fn specs(&self) -> &[GoldenSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Narrows `all` to the specs named by `filters`
///
/// No filters selects everything. Otherwise a spec is kept when its name
/// contains at least one filter as a case-sensitive substring. Order always
/// follows `all`, and each spec appears at most once.
pub fn select_specs<'a, S: AsRef<str>>(all: &'a [GoldenSpec], filters: &[S]) -> Vec<&'a GoldenSpec> {
    if filters.is_empty() {
        return all.iter().collect();
    }
    all.iter()
        .filter(|spec| filters.iter().any(|f| spec.name.contains(f.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use golden_core::FontReference;
    use proptest::prelude::*;

    fn fonts() -> ResolvedFonts {
        ResolvedFonts {
            mono: FontReference::new("monospace", "/fonts/mono.ttf"),
            serif: FontReference::new("serif", "/fonts/serif.ttf"),
        }
    }

    fn names(specs: &[&GoldenSpec]) -> Vec<String> {
        specs.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn standard_table_is_valid() {
        let table = SpecTable::standard(&fonts());
        assert_eq!(table.len(), 5);
        assert!(SpecTable::new(table.specs().to_vec()).is_ok());
        for spec in table.iter() {
            assert!(spec.width > 0 && spec.height > 0 && spec.font_size > 0);
            assert_eq!((spec.left, spec.top), (10, 10));
        }
    }

    #[test]
    fn standard_table_matches_harness_contract() {
        let table = SpecTable::standard(&fonts());
        let rows: Vec<_> = table
            .iter()
            .map(|s| (s.name.as_str(), s.text.as_str(), s.font_size, s.width, s.height))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("golden_document_22px_mono", "document", 22, 250, 60),
                ("golden_mm_22px_mono", "mm", 22, 100, 50),
                ("golden_hello_15px_mono", "Hello, World!", 15, 200, 40),
                ("golden_av_22px_serif", "AV", 22, 100, 50),
                ("golden_code_15px_mono", "fn main() {", 15, 200, 40),
            ]
        );
    }

    #[test]
    fn serif_row_uses_serif_font() {
        let table = SpecTable::standard(&fonts());
        let av = table.get("golden_av_22px_serif").unwrap();
        assert_eq!(av.font_path().to_str(), Some("/fonts/serif.ttf"));
        let mm = table.get("golden_mm_22px_mono").unwrap();
        assert_eq!(mm.font_path().to_str(), Some("/fonts/mono.ttf"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let font = FontReference::new("monospace", "/fonts/mono.ttf");
        let specs = vec![
            GoldenSpec::new("golden_mm_22px_mono", "mm", 22, 100, 50, &font),
            GoldenSpec::new("golden_mm_22px_mono", "mmm", 22, 100, 50, &font),
        ];
        assert!(matches!(SpecTable::new(specs), Err(GoldenError::InvalidSpec(_))));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let font = FontReference::new("monospace", "/fonts/mono.ttf");
        for spec in [
            GoldenSpec::new("zero_width", "x", 22, 0, 50, &font),
            GoldenSpec::new("zero_height", "x", 22, 100, 0, &font),
            GoldenSpec::new("zero_size", "x", 0, 100, 50, &font),
        ] {
            assert!(SpecTable::new(vec![spec]).is_err());
        }
    }

    #[test]
    fn no_filters_selects_everything_in_order() {
        let table = SpecTable::standard(&fonts());
        let selected = table.select::<&str>(&[]);
        assert_eq!(selected.len(), 5);
        assert!(selected.iter().zip(table.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn mono_filter_excludes_serif() {
        let table = SpecTable::standard(&fonts());
        assert_eq!(
            names(&table.select(&["mono"])),
            vec![
                "golden_document_22px_mono",
                "golden_mm_22px_mono",
                "golden_hello_15px_mono",
                "golden_code_15px_mono",
            ]
        );
    }

    #[test]
    fn filters_are_or_combined_and_case_sensitive() {
        let table = SpecTable::standard(&fonts());
        assert_eq!(
            names(&table.select(&["serif", "hello"])),
            vec!["golden_hello_15px_mono", "golden_av_22px_serif"]
        );
        assert!(table.select(&["MONO"]).is_empty());
        assert!(table.select(&["nothing_matches"]).is_empty());
    }

    #[test]
    fn overlapping_filters_do_not_duplicate() {
        let table = SpecTable::standard(&fonts());
        assert_eq!(table.select(&["mm", "22px", "golden"]).len(), 5);
    }

    proptest! {
        #[test]
        fn selection_is_an_ordered_subset(filters in prop::collection::vec("[a-z_0-9]{0,6}", 0..4)) {
            let table = SpecTable::standard(&fonts());
            let selected = table.select(&filters);

            // Every selected spec is in the table, in table order
            let positions: Vec<usize> = selected
                .iter()
                .map(|s| table.iter().position(|t| t == *s).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

            // Membership is exactly "some filter is a substring of the name"
            for spec in table.iter() {
                let expected = filters.is_empty()
                    || filters.iter().any(|f| spec.name.contains(f.as_str()));
                prop_assert_eq!(selected.contains(&spec), expected);
            }
        }

        #[test]
        fn adding_a_filter_never_shrinks_selection(
            filters in prop::collection::vec("[a-z_0-9]{1,6}", 1..4),
            extra in "[a-z_0-9]{1,6}",
        ) {
            let table = SpecTable::standard(&fonts());
            let before = table.select(&filters).len();
            let mut more = filters.clone();
            more.push(extra);
            prop_assert!(table.select(&more).len() >= before);
        }
    }
}
