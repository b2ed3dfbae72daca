//! Annotation records and the per-run annotation set.
//!
//! An [`Annotation`] is one labeled polygon region within one image; an
//! [`AnnotationSet`] maps image identifiers to their ordered record
//! sequences. Both orders are significant: images keep the file order of the
//! annotation source, records keep their order within each image's JSON
//! array, and the linker assigns ids from that record order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One labeled polygon region within one image.
///
/// The wire format is a JSON object with `label` and `points` always
/// present. `id` and `linking` are absent on fresh input and populated by
/// the linker; `transcription` is carried through verbatim when the source
/// data has it. `difficult` is a legacy field tolerated on input and never
/// written back, and `image_path` is a transient traceability field set by
/// the reader and likewise never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Semantic class of the region, e.g. `vaccine_name` or `vaccine_date`.
    pub label: String,

    /// Polygon vertices in order, serialized as `[[x, y], ...]`.
    pub points: Vec<(f64, f64)>,

    /// Recognized text for the region, if the source data carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    /// Per-image id, dense `1..N` in record order after linking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// Undirected link pairs `[source_id, target_id]`, mirrored on both
    /// endpoints. A record chosen as nearest neighbor by several
    /// counterparts holds one pair per counterpart.
    #[serde(default)]
    pub linking: Vec<[u32; 2]>,

    /// Legacy flag accepted on input, dropped on output.
    #[serde(default, skip_serializing)]
    pub difficult: Option<serde_json::Value>,

    /// Image identifier of the enclosing line, dropped on output.
    #[serde(default, skip_serializing)]
    pub image_path: Option<String>,
}

impl Annotation {
    /// Creates a record with just a label and polygon, as it would appear on
    /// fresh, unlinked input.
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
            transcription: None,
            id: None,
            linking: Vec::new(),
            difficult: None,
            image_path: None,
        }
    }
}

/// Ordered mapping from image identifier to that image's annotation records.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    images: IndexMap<String, Vec<Annotation>>,
}

impl AnnotationSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of images in the set.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the set holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Records for one image, if present.
    pub fn get(&self, image: &str) -> Option<&[Annotation]> {
        self.images.get(image).map(Vec::as_slice)
    }

    /// Appends records to an image's sequence, creating the image entry on
    /// first sight. Repeated identifiers accumulate into one sequence, so
    /// images are not required to be contiguous in the source file.
    pub fn extend_image(&mut self, image: &str, records: Vec<Annotation>) {
        self.images
            .entry(image.to_string())
            .or_default()
            .extend(records);
    }

    /// Iterates images in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Annotation])> {
        self.images.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterates images in insertion order with mutable record access.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Annotation>)> {
        self.images.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_accumulate_for_repeated_image() {
        let mut set = AnnotationSet::new();
        set.extend_image("a.jpg", vec![Annotation::new("vaccine_name", vec![(0.0, 0.0)])]);
        set.extend_image("b.jpg", vec![Annotation::new("other", vec![(1.0, 1.0)])]);
        set.extend_image("a.jpg", vec![Annotation::new("vaccine_date", vec![(2.0, 2.0)])]);

        assert_eq!(set.len(), 2);
        let records = set.get("a.jpg").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "vaccine_name");
        assert_eq!(records[1].label, "vaccine_date");
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut set = AnnotationSet::new();
        for name in ["z.jpg", "a.jpg", "m.jpg"] {
            set.extend_image(name, Vec::new());
        }

        let order: Vec<&str> = set.iter().map(|(image, _)| image).collect();
        assert_eq!(order, vec!["z.jpg", "a.jpg", "m.jpg"]);
    }

    #[test]
    fn test_transient_fields_are_not_serialized() {
        let mut record = Annotation::new("vaccine_name", vec![(1.5, 2.0)]);
        record.difficult = Some(serde_json::json!(false));
        record.image_path = Some("a.jpg".to_string());
        record.id = Some(1);

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("difficult"));
        assert!(!json.contains("image_path"));
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"linking\":[]"));
    }

    #[test]
    fn test_optional_fields_tolerated_on_input() {
        let json = r#"{"label":"vaccine_date","points":[[10,20],[30,20]],"difficult":true}"#;
        let record: Annotation = serde_json::from_str(json).unwrap();

        assert_eq!(record.label, "vaccine_date");
        assert_eq!(record.points, vec![(10.0, 20.0), (30.0, 20.0)]);
        assert!(record.id.is_none());
        assert!(record.linking.is_empty());
        assert!(record.difficult.is_some());
    }
}
