//! Serializer for tab-separated annotation files.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::core::{PrepError, PrepResult};
use crate::domain::AnnotationSet;

/// Writes an [`AnnotationSet`] as one `<image>\t<json_array>` line per
/// image, in the set's insertion order.
///
/// The transient `image_path` and legacy `difficult` fields never appear in
/// the output (the record type skips them during serialization); all
/// retained fields are written unmodified, with coordinates at full `f64`
/// precision and ids/links as exact integers. The destination is created
/// fresh, so callers pass a path distinct from the input file.
pub fn save_annotations(set: &AnnotationSet, path: &Path) -> PrepResult<()> {
    info!("saving annotations to {}", path.display());

    let file = fs::File::create(path).map_err(|e| {
        PrepError::io(
            format!("failed to create annotation file {}", path.display()),
            e,
        )
    })?;
    let mut writer = BufWriter::new(file);

    for (image, records) in set.iter() {
        let payload = serde_json::to_string(records).map_err(|e| PrepError::json(image, e))?;
        writeln!(writer, "{image}\t{payload}")
            .map_err(|e| PrepError::io(format!("failed to write {}", path.display()), e))?;
    }

    writer
        .flush()
        .map_err(|e| PrepError::io(format!("failed to write {}", path.display()), e))?;

    info!("annotations saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_annotations;
    use crate::domain::Annotation;
    use crate::processors::link_annotations;
    use std::io::Write as _;

    fn sample_set() -> AnnotationSet {
        let mut set = AnnotationSet::new();
        let mut name = Annotation::new("vaccine_name", vec![(10.5, 10.0), (20.0, 10.0)]);
        name.transcription = Some("Tetanus".to_string());
        name.difficult = Some(serde_json::json!(false));
        name.image_path = Some("a.jpg".to_string());
        let date = Annotation::new("vaccine_date", vec![(10.0, 30.0), (20.0, 30.0)]);
        set.extend_image("a.jpg", vec![name, date]);
        set
    }

    #[test]
    fn test_output_format_and_stripped_fields() {
        let mut set = sample_set();
        link_annotations(&mut set);

        let file = tempfile::NamedTempFile::new().unwrap();
        save_annotations(&set, file.path()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.ends_with('\n'));

        let line = contents.lines().next().unwrap();
        let (image, payload) = line.split_once('\t').unwrap();
        assert_eq!(image, "a.jpg");
        assert!(!payload.contains("difficult"));
        assert!(!payload.contains("image_path"));
        assert!(payload.contains("\"id\":1"));
        assert!(payload.contains("\"linking\":[[1,2]]"));
        assert!(payload.contains("\"transcription\":\"Tetanus\""));
    }

    #[test]
    fn test_round_trip_reproduces_records() {
        let mut set = sample_set();
        link_annotations(&mut set);

        let file = tempfile::NamedTempFile::new().unwrap();
        save_annotations(&set, file.path()).unwrap();
        let reparsed = read_annotations(file.path()).unwrap();

        assert_eq!(reparsed.len(), set.len());
        let before = set.get("a.jpg").unwrap();
        let after = reparsed.get("a.jpg").unwrap();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after) {
            assert_eq!(b.label, a.label);
            assert_eq!(b.points, a.points);
            assert_eq!(b.transcription, a.transcription);
            assert_eq!(b.id, a.id);
            assert_eq!(b.linking, a.linking);
            assert!(a.difficult.is_none());
        }
    }

    #[test]
    fn test_input_file_is_not_rewritten() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        input
            .write_all(b"a.jpg\t[{\"label\":\"vaccine_name\",\"points\":[[1,2]]}]\n")
            .unwrap();
        let original = std::fs::read_to_string(input.path()).unwrap();

        let mut set = read_annotations(input.path()).unwrap();
        link_annotations(&mut set);

        let output = tempfile::NamedTempFile::new().unwrap();
        save_annotations(&set, output.path()).unwrap();

        assert_eq!(std::fs::read_to_string(input.path()).unwrap(), original);
        assert_ne!(std::fs::read_to_string(output.path()).unwrap(), original);
    }
}
