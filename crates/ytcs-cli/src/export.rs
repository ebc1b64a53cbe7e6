//! CSV export of labeled comments.
//!
//! The file starts with a UTF-8 byte-order mark so spreadsheet tools detect
//! the encoding and keep non-ASCII text intact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ytcs_core::LabeledComment;

pub(crate) const HEADER: [&str; 6] = [
    "Author",
    "Published At",
    "Updated At",
    "Like Count",
    "Comment",
    "Sentiment",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const EXTENSION: &str = ".csv";

/// Filename length limit on common filesystems, in bytes.
const MAX_FILENAME_BYTES: usize = 255;

/// `<output_dir>/<title>.csv`. The title must already be sanitized.
///
/// Long titles are cut on a character boundary so the filename stays
/// within [`MAX_FILENAME_BYTES`].
pub(crate) fn output_path(output_dir: &Path, title: &str) -> PathBuf {
    let stem = truncate_bytes(title, MAX_FILENAME_BYTES - EXTENSION.len());
    output_dir.join(format!("{stem}{EXTENSION}"))
}

fn truncate_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Write every row to `path`, replacing any existing file.
///
/// Rows are written in order with no deduplication.
///
/// # Errors
///
/// Returns [`csv::Error`] if the file cannot be created or written.
pub(crate) fn write_csv(path: &Path, rows: &[LabeledComment]) -> Result<(), csv::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADER)?;
    for row in rows {
        let c = &row.comment;
        let like_count = c.like_count.to_string();
        writer.write_record([
            c.author.as_str(),
            c.published_at.as_str(),
            c.updated_at.as_str(),
            like_count.as_str(),
            c.text.as_str(),
            row.sentiment.value().as_str(),
        ])?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use ytcs_core::{Comment, Outcome};

    use super::*;

    fn row(author: &str, likes: u64, text: &str, label: Outcome<String>) -> LabeledComment {
        LabeledComment {
            comment: Comment {
                author: author.to_string(),
                published_at: "2024-03-01T12:00:00Z".to_string(),
                updated_at: "2024-03-02T08:15:00Z".to_string(),
                like_count: likes,
                text: text.to_string(),
            },
            sentiment: label,
        }
    }

    fn read_back(path: &Path) -> (Vec<u8>, Vec<Vec<String>>) {
        let bytes = std::fs::read(path).unwrap();
        let body = bytes.strip_prefix(UTF8_BOM).expect("file should start with a BOM");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(body);
        let records = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (bytes, records)
    }

    #[test]
    fn output_path_appends_csv_extension() {
        assert_eq!(
            output_path(Path::new("/tmp/out"), "My_Video"),
            PathBuf::from("/tmp/out/My_Video.csv")
        );
    }

    #[test]
    fn output_path_caps_long_multibyte_titles() {
        let title = "日本語のタイトル🎉".repeat(20);
        assert!(title.len() > MAX_FILENAME_BYTES);

        let path = output_path(Path::new("/tmp/out"), &title);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.len() <= MAX_FILENAME_BYTES, "{} bytes", name.len());
        let stem = name.strip_suffix(EXTENSION).unwrap();
        assert!(title.starts_with(stem));
        assert!(!stem.is_empty());
    }

    #[test]
    fn long_title_file_can_be_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), &"😀".repeat(100));

        write_csv(&path, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn round_trip_preserves_fields_and_non_ascii_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.csv");
        let rows = vec![
            row(
                "José",
                42,
                "Ótimo vídeo, \"muito\" bom,\nobrigado 🎉",
                Outcome::Authoritative("positive".to_string()),
            ),
            row("山田", 0, "微妙でした", Outcome::Authoritative("negative".to_string())),
            row(
                "anon",
                7,
                "???",
                Outcome::placeholder("unknown".to_string(), "inference failed"),
            ),
        ];

        write_csv(&path, &rows).unwrap();
        let (bytes, records) = read_back(&path);

        assert!(bytes.starts_with(UTF8_BOM));
        assert!(!bytes[UTF8_BOM.len()..].starts_with(UTF8_BOM), "BOM written once");
        assert_eq!(records.len(), rows.len() + 1);
        assert_eq!(records[0], HEADER.map(str::to_string).to_vec());

        for (record, input) in records[1..].iter().zip(&rows) {
            let c = &input.comment;
            assert_eq!(record[0], c.author);
            assert_eq!(record[1], c.published_at);
            assert_eq!(record[2], c.updated_at);
            assert_eq!(record[3], c.like_count.to_string());
            assert_eq!(record[4], c.text);
            assert_eq!(&record[5], input.sentiment.value());
        }
        assert_eq!(records[3][5], "unknown");
    }

    #[test]
    fn duplicates_are_written_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dups.csv");
        let r = row("a", 1, "same", Outcome::Authoritative("neutral".to_string()));

        write_csv(&path, &[r.clone(), r]).unwrap();
        let (_, records) = read_back(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], records[2]);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.csv");
        std::fs::write(&path, "stale contents that are much longer than the new file").unwrap();

        write_csv(&path, &[]).unwrap();
        let (_, records) = read_back(&path);
        assert_eq!(records, vec![HEADER.map(str::to_string).to_vec()]);
    }
}
