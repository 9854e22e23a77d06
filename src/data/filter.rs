use std::fmt;

use super::model::AnodeDataset;

// ---------------------------------------------------------------------------
// Material selection
// ---------------------------------------------------------------------------

/// What the selector currently shows: everything, or one material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Material(String),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Material(label) => write!(f, "{label}"),
        }
    }
}

/// Selector entries: `All` followed by every distinct label in sorted order.
pub fn selection_options(dataset: &AnodeDataset) -> Vec<Selection> {
    std::iter::once(Selection::All)
        .chain(dataset.labels.iter().cloned().map(Selection::Material))
        .collect()
}

/// Return indices of the records the selection covers.
///
/// * `All` → every record, in source order
/// * `Material(label)` → the first record carrying that label, if any
pub fn selected_indices(dataset: &AnodeDataset, selection: &Selection) -> Vec<usize> {
    match selection {
        Selection::All => (0..dataset.len()).collect(),
        Selection::Material(label) => dataset
            .records
            .iter()
            .position(|r| r.label() == label)
            .into_iter()
            .collect(),
    }
}

/// Keep `selection` if it still names a label in `dataset`, otherwise fall back to `All`.
pub fn revalidate(dataset: &AnodeDataset, selection: Selection) -> Selection {
    match &selection {
        Selection::Material(label) if dataset.labels.binary_search(label).is_err() => {
            Selection::All
        }
        _ => selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::dataset;

    #[test]
    fn options_start_with_all_and_have_no_duplicates() {
        let ds = dataset();
        let opts = selection_options(&ds);
        assert_eq!(opts[0], Selection::All);
        assert_eq!(opts.len(), ds.labels.len() + 1);

        let labels: Vec<String> = opts[1..].iter().map(|s| s.to_string()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(labels, sorted);
        assert!(!labels.iter().any(|l| l.trim().is_empty() || l == "Unknown"));
    }

    #[test]
    fn all_selects_every_record() {
        let ds = dataset();
        assert_eq!(selected_indices(&ds, &Selection::All), (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn material_selects_first_match_only() {
        let ds = dataset();
        let idx = selected_indices(&ds, &Selection::Material("SnO2".into()));
        assert_eq!(idx, vec![0]);
        assert!(selected_indices(&ds, &Selection::Material("Pb".into())).is_empty());
    }

    #[test]
    fn revalidate_drops_stale_material() {
        let ds = dataset();
        assert_eq!(
            revalidate(&ds, Selection::Material("Pb".into())),
            Selection::All
        );
        assert_eq!(
            revalidate(&ds, Selection::Material("Sn4P3".into())),
            Selection::Material("Sn4P3".into())
        );
    }
}
