use crate::model::ProductRecord;
use std::path::{Path, PathBuf};

/// Resolves the directory a record (or the category index) is written to
///
/// | record | flatten | directory |
/// |--------|---------|-----------|
/// | None | any | `base/` |
/// | Some | true | `base/<name>/` |
/// | Some | false | `base/<category>/<subcategory>/<name>/` |
///
/// The result always ends with a separator. Empty segments add no directory
/// level, exactly like `base//sub` on disk. Leading separators inside a
/// segment are dropped so a segment never replaces `base`.
///
/// # Example
///
/// ```
/// use shop_crawler::{resolve_dump_path, ProductRecord};
/// use std::path::Path;
///
/// let record = ProductRecord {
///     category: "Apparel".to_string(),
///     subcategory: "Shirts".to_string(),
///     name: "Uniform Tee".to_string(),
///     ..Default::default()
/// };
///
/// let dir = resolve_dump_path(Path::new("dumps"), false, Some(&record));
/// assert_eq!(dir, Path::new("dumps/Apparel/Shirts/Uniform Tee/"));
/// ```
pub fn resolve_dump_path(base: &Path, flatten: bool, record: Option<&ProductRecord>) -> PathBuf {
    let mut path = base.to_path_buf();

    match record {
        None => {}
        Some(record) if flatten => push_segment(&mut path, &record.name),
        Some(record) => {
            push_segment(&mut path, &record.category);
            push_segment(&mut path, &record.subcategory);
            push_segment(&mut path, &record.name);
        }
    }

    path.push("");
    path
}

fn push_segment(path: &mut PathBuf, segment: &str) {
    let segment = segment.trim_start_matches(['/', '\\']);
    if !segment.is_empty() {
        path.push(segment);
    }
}
