//! Nearest-neighbor linking between vaccine name and date annotations.
//!
//! For every image independently, each `vaccine_name` record is paired with
//! the `vaccine_date` record whose centroid is closest by Manhattan
//! distance. The assignment is greedy per source, not a global matching: a
//! date can be chosen by several names and then carries one link pair per
//! name.

use tracing::{debug, info};

use crate::domain::{Annotation, AnnotationSet};
use crate::processors::geometry::{centroid, manhattan_distance};

/// Label of the records links start from.
pub const SOURCE_LABEL: &str = "vaccine_name";

/// Label of the records links point to.
pub const TARGET_LABEL: &str = "vaccine_date";

/// Assigns per-image ids and links every source record to its nearest
/// target record, mutating the set in place.
///
/// For each image:
///
/// 1. Ids `1..N` are assigned in existing record order and every record's
///    `linking` list is cleared, so re-running fully recomputes state
///    rather than adding to it.
/// 2. Records are partitioned by exact label equality into sources
///    ([`SOURCE_LABEL`]) and targets ([`TARGET_LABEL`]); all other labels
///    keep their id and take no part in linking.
/// 3. Each source is paired with the target at strictly minimal Manhattan
///    centroid distance; on ties the earliest target in sequence order
///    wins. A source with no computable centroid, or an image with no
///    targets, produces no pair.
/// 4. The pair `[source_id, target_id]` is appended to both endpoints'
///    `linking` lists, without deduplication.
pub fn link_annotations(set: &mut AnnotationSet) {
    for (image, records) in set.iter_mut() {
        debug!("linking annotations for {image}");

        for (index, record) in records.iter_mut().enumerate() {
            record.id = Some(index as u32 + 1);
            record.linking.clear();
        }

        let sources: Vec<usize> = indices_with_label(records, SOURCE_LABEL);
        let targets: Vec<usize> = indices_with_label(records, TARGET_LABEL);

        let mut linked = 0usize;
        for &source in &sources {
            let Some(source_center) = centroid(&records[source].points) else {
                continue;
            };

            let mut closest: Option<(usize, f64)> = None;
            for &target in &targets {
                let Some(target_center) = centroid(&records[target].points) else {
                    continue;
                };
                let distance = manhattan_distance(source_center, target_center);
                // strict < keeps the earliest-seen minimum on ties
                if closest.is_none_or(|(_, best)| distance < best) {
                    closest = Some((target, distance));
                }
            }

            if let Some((target, _)) = closest {
                // ids are positional: record at index i holds id i + 1
                let pair = [source as u32 + 1, target as u32 + 1];
                records[source].linking.push(pair);
                records[target].linking.push(pair);
                linked += 1;
            }
        }

        info!(
            "linked {linked} of {} {SOURCE_LABEL} records for {image}",
            sources.len()
        );
    }
}

fn indices_with_label(records: &[Annotation], label: &str) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.label == label)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Annotation;

    fn record_at(label: &str, x: f64, y: f64) -> Annotation {
        // a 2x2 square centered on (x, y)
        Annotation::new(
            label,
            vec![
                (x - 1.0, y - 1.0),
                (x + 1.0, y - 1.0),
                (x + 1.0, y + 1.0),
                (x - 1.0, y + 1.0),
            ],
        )
    }

    fn set_with(records: Vec<Annotation>) -> AnnotationSet {
        let mut set = AnnotationSet::new();
        set.extend_image("a.jpg", records);
        set
    }

    #[test]
    fn test_ids_are_dense_in_record_order() {
        let mut set = set_with(vec![
            record_at("other", 0.0, 0.0),
            record_at("vaccine_date", 5.0, 5.0),
            record_at("vaccine_name", 9.0, 9.0),
        ]);
        link_annotations(&mut set);

        let ids: Vec<u32> = set
            .get("a.jpg")
            .unwrap()
            .iter()
            .map(|r| r.id.unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_name_links_to_nearest_date() {
        // name at (10, 10); dates at (10, 20) and (10, 15): distance 10 vs 5
        let mut set = set_with(vec![
            record_at("vaccine_name", 10.0, 10.0),
            record_at("vaccine_date", 10.0, 20.0),
            record_at("vaccine_date", 10.0, 15.0),
        ]);
        link_annotations(&mut set);

        let records = set.get("a.jpg").unwrap();
        assert_eq!(records[0].linking, vec![[1, 3]]);
        assert!(records[1].linking.is_empty());
        assert_eq!(records[2].linking, vec![[1, 3]]);
    }

    #[test]
    fn test_tie_breaks_to_earliest_target() {
        // both dates are at distance 10 from the name
        let mut set = set_with(vec![
            record_at("vaccine_name", 10.0, 10.0),
            record_at("vaccine_date", 10.0, 20.0),
            record_at("vaccine_date", 20.0, 10.0),
        ]);
        link_annotations(&mut set);

        let records = set.get("a.jpg").unwrap();
        assert_eq!(records[0].linking, vec![[1, 2]]);
        assert_eq!(records[1].linking, vec![[1, 2]]);
        assert!(records[2].linking.is_empty());
    }

    #[test]
    fn test_shared_target_accumulates_pairs() {
        let mut set = set_with(vec![
            record_at("vaccine_name", 0.0, 0.0),
            record_at("vaccine_name", 4.0, 0.0),
            record_at("vaccine_date", 2.0, 0.0),
        ]);
        link_annotations(&mut set);

        let records = set.get("a.jpg").unwrap();
        assert_eq!(records[0].linking, vec![[1, 3]]);
        assert_eq!(records[1].linking, vec![[2, 3]]);
        assert_eq!(records[2].linking, vec![[1, 3], [2, 3]]);
    }

    #[test]
    fn test_no_targets_leaves_sources_unlinked() {
        let mut set = set_with(vec![
            record_at("vaccine_name", 0.0, 0.0),
            record_at("other", 2.0, 0.0),
        ]);
        link_annotations(&mut set);

        for record in set.get("a.jpg").unwrap() {
            assert!(record.id.is_some());
            assert!(record.linking.is_empty());
        }
    }

    #[test]
    fn test_relinking_recomputes_state() {
        let mut set = set_with(vec![
            record_at("vaccine_name", 0.0, 0.0),
            record_at("vaccine_date", 2.0, 0.0),
        ]);
        link_annotations(&mut set);
        let first: Vec<Annotation> = set.get("a.jpg").unwrap().to_vec();

        // a second pass discards previous ids/links instead of appending
        link_annotations(&mut set);
        assert_eq!(set.get("a.jpg").unwrap(), &first[..]);
    }

    #[test]
    fn test_links_are_mirrored_on_both_endpoints() {
        let mut set = set_with(vec![
            record_at("vaccine_name", 0.0, 0.0),
            record_at("vaccine_name", 10.0, 10.0),
            record_at("vaccine_date", 1.0, 1.0),
            record_at("vaccine_date", 11.0, 11.0),
        ]);
        link_annotations(&mut set);

        let records = set.get("a.jpg").unwrap();
        for record in records {
            let id = record.id.unwrap();
            for pair in &record.linking {
                let other = if pair[0] == id { pair[1] } else { pair[0] };
                let counterpart = records.iter().find(|r| r.id == Some(other)).unwrap();
                assert!(counterpart.linking.contains(pair));
            }
        }
    }

    #[test]
    fn test_images_are_linked_independently() {
        let mut set = AnnotationSet::new();
        set.extend_image(
            "a.jpg",
            vec![
                record_at("vaccine_name", 0.0, 0.0),
                record_at("vaccine_date", 1.0, 0.0),
            ],
        );
        set.extend_image("b.jpg", vec![record_at("vaccine_date", 0.0, 0.0)]);
        link_annotations(&mut set);

        // ids restart at 1 for every image
        assert_eq!(set.get("a.jpg").unwrap()[0].id, Some(1));
        assert_eq!(set.get("b.jpg").unwrap()[0].id, Some(1));
        assert!(set.get("b.jpg").unwrap()[0].linking.is_empty());
    }

    #[test]
    fn test_source_without_points_is_skipped() {
        let mut set = set_with(vec![
            Annotation::new("vaccine_name", Vec::new()),
            record_at("vaccine_date", 1.0, 1.0),
        ]);
        link_annotations(&mut set);

        let records = set.get("a.jpg").unwrap();
        assert_eq!(records[0].id, Some(1));
        assert!(records[0].linking.is_empty());
        assert!(records[1].linking.is_empty());
    }
}
