use super::filter::Selection;
use super::model::{AnodeDataset, AnodeRecord};

/// Headroom past the largest current density on the x axis.
const X_MARGIN: f64 = 1.1;

/// One line on the capacity chart: `[density, capacity]` points of a single record.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Cycle-life points of a single record for the bubble chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSeries {
    pub label: String,
    /// `([density, capacity], cycles)`
    pub bubbles: Vec<([f64; 2], u32)>,
}

/// Capacity-vs-density lines for the current selection.
///
/// `All` yields one series per record that has capacity data, grouped by
/// label in sorted label order. A material yields at most the one series of
/// its first record.
pub fn capacity_series(dataset: &AnodeDataset, selection: &Selection) -> Vec<Series> {
    let to_series = |label: &str, rec: &AnodeRecord| Series {
        label: label.to_string(),
        points: rec.capacity.iter().map(|p| [p.density, p.capacity]).collect(),
    };

    match selection {
        Selection::All => dataset
            .labels
            .iter()
            .flat_map(move |label| {
                dataset
                    .records
                    .iter()
                    .filter(move |r| r.label() == label && !r.capacity.is_empty())
                    .map(move |r| to_series(label.as_str(), r))
            })
            .collect(),
        Selection::Material(label) => dataset
            .first_with_label(label)
            .filter(|r| !r.capacity.is_empty())
            .map(|r| to_series(label.as_str(), r))
            .into_iter()
            .collect(),
    }
}

/// Cycle-life bubbles for every record that has any, in source order.
pub fn bubble_series(dataset: &AnodeDataset) -> Vec<BubbleSeries> {
    dataset
        .records
        .iter()
        .filter(|r| !r.cycle_life.is_empty())
        .map(|r| BubbleSeries {
            label: r.label().to_string(),
            bubbles: r
                .cycle_life
                .iter()
                .map(|p| ([p.density, p.capacity], p.cycles))
                .collect(),
        })
        .collect()
}

/// Largest density over a set of `[density, capacity]` points.
pub fn max_density<'a, I>(points: I) -> f64
where
    I: IntoIterator<Item = &'a [f64; 2]>,
{
    points.into_iter().map(|p| p[0]).fold(0.0, f64::max)
}

/// Upper end of the x axis, or `None` when there is nothing to plot.
pub fn x_upper_bound(max_density: f64) -> Option<f64> {
    (max_density > 0.0).then(|| max_density * X_MARGIN)
}

/// X bound of the bubble chart. It spans the capacity points as well as the
/// cycle-life points so both aggregate charts can share one scale.
pub fn bubble_x_bound(series: &[Series], bubbles: &[BubbleSeries]) -> Option<f64> {
    let capacity = series.iter().flat_map(|s| s.points.iter());
    let cycle = bubbles.iter().flat_map(|b| b.bubbles.iter().map(|(p, _)| p));
    x_upper_bound(max_density(capacity.chain(cycle)))
}

/// Bubble marker area in plot units: one unit per ten cycles.
pub fn bubble_area(cycles: u32) -> f64 {
    f64::from(cycles) / 10.0
}

/// Marker radius for a bubble, with a floor so short-lived materials stay visible.
pub fn bubble_radius(cycles: u32) -> f32 {
    ((bubble_area(cycles).sqrt() / 2.0) as f32).max(2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::dataset;

    #[test]
    fn all_groups_series_by_sorted_label() {
        let ds = dataset();
        let series = capacity_series(&ds, &Selection::All);
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        // Sn-C has no capacity data; SnO2 appears once per record.
        assert_eq!(labels, vec!["Sn4P3", "SnO2", "SnO2"]);
        assert_eq!(series[1].points, vec![[0.1, 520.0], [1.0, 410.0]]);
        assert_eq!(series[2].points, vec![[5.0, 300.0]]);
    }

    #[test]
    fn material_uses_first_record() {
        let ds = dataset();
        let series = capacity_series(&ds, &Selection::Material("SnO2".into()));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points.len(), 2);

        assert!(capacity_series(&ds, &Selection::Material("Sn-C".into())).is_empty());
    }

    #[test]
    fn bubbles_follow_source_order() {
        let ds = dataset();
        let bubbles = bubble_series(&ds);
        let labels: Vec<&str> = bubbles.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["SnO2", "SnO2", "Sn-C"]);
        assert_eq!(bubbles[2].bubbles, vec![([4.0, 250.0], 2000)]);
    }

    #[test]
    fn axis_bound_scales_max_density() {
        let ds = dataset();
        let series = capacity_series(&ds, &Selection::All);
        let max = max_density(series.iter().flat_map(|s| s.points.iter()));
        assert_eq!(max, 5.0);
        let bound = x_upper_bound(max).unwrap();
        assert!((bound - 5.5).abs() < 1e-9);
        assert_eq!(x_upper_bound(0.0), None);
    }

    #[test]
    fn bubble_bound_covers_both_charts() {
        let series = vec![Series {
            label: "SnO2".into(),
            points: vec![[0.5, 520.0], [2.0, 410.0]],
        }];
        let bubbles = vec![BubbleSeries {
            label: "Sn-C".into(),
            bubbles: vec![([8.0, 250.0], 2000)],
        }];
        let bound = bubble_x_bound(&series, &bubbles).unwrap();
        assert!((bound - 8.8).abs() < 1e-9);

        // Capacity points alone still set the bound when they reach further.
        let bound = bubble_x_bound(&series, &[]).unwrap();
        assert!((bound - 2.2).abs() < 1e-9);
        assert_eq!(bubble_x_bound(&[], &[]), None);

        // Fixture data: capacity max 5, cycle-life max 4.
        let ds = dataset();
        let bound = bubble_x_bound(&capacity_series(&ds, &Selection::All), &bubble_series(&ds));
        assert!((bound.unwrap() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn bubble_size_grows_with_cycles() {
        assert_eq!(bubble_area(200), 20.0);
        assert!(bubble_radius(5000) > bubble_radius(1000));
        assert_eq!(bubble_radius(1), 2.0);
    }
}
