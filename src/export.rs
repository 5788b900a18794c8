//! Single-record document export
//!
//! Lays out one student on an A4 page (header plus five fields, one line
//! every 10mm) and writes it as a one-page PDF named after the student.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::types::Student;

/// A4 portrait, in points
const PAGE_WIDTH_PT: f64 = 595.28;
const PAGE_HEIGHT_PT: f64 = 841.89;
const PT_PER_MM: f64 = 72.0 / 25.4;
const FONT_SIZE: u32 = 16;

/// One line of text, positioned in millimetres from the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x_mm: f64,
    pub y_mm: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub file_name: String,
    pub lines: Vec<TextLine>,
}

impl ExportDocument {
    pub fn from_student(student: &Student) -> Self {
        let texts = [
            "Student Information".to_string(),
            format!("Name: {}", student.name),
            format!("Age: {}", student.age),
            format!("Address: {}", student.address),
            format!("Grade: {}", student.grade),
            format!("Created At: {}", student.created_at_display()),
        ];

        let lines = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextLine {
                x_mm: 10.0,
                y_mm: 10.0 * (i as f64 + 1.0),
                text,
            })
            .collect();

        Self {
            file_name: format!("{}.pdf", safe_file_stem(&student.name)),
            lines,
        }
    }

    /// Render as a single-page PDF using the built-in Helvetica font.
    pub fn to_pdf(&self) -> Vec<u8> {
        let mut content = Vec::new();
        for line in &self.lines {
            let x = line.x_mm * PT_PER_MM;
            let y = PAGE_HEIGHT_PT - line.y_mm * PT_PER_MM;
            content.extend_from_slice(
                format!("BT /F1 {FONT_SIZE} Tf {x:.2} {y:.2} Td (").as_bytes(),
            );
            content.extend(pdf_string_bytes(&line.text));
            content.extend_from_slice(b") Tj ET\n");
        }

        let mut objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT} {PAGE_HEIGHT_PT}] \
                 /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            )
            .into_bytes(),
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        ];
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"endstream");
        objects.push(stream);

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_start = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            objects.len() + 1
        ));
        out.extend_from_slice(xref.as_bytes());
        out
    }

    /// Write the PDF into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.to_pdf())?;
        info!(path = %path.display(), "Exported student document");
        Ok(path)
    }
}

/// File stem derived from a student name. Separators, control characters
/// and characters reserved on Windows become `_`.
pub fn safe_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "student".to_string()
    } else {
        stem.to_string()
    }
}

/// Latin-1 bytes with PDF string escapes; anything outside Latin-1 becomes `?`.
fn pdf_string_bytes(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            c if (c as u32) < 0x20 => out.push(b' '),
            c => out.push(u8::try_from(c as u32).unwrap_or(b'?')),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentId;
    use chrono::{TimeZone, Utc};

    fn student(name: &str) -> Student {
        Student {
            id: StudentId::from("1"),
            name: name.to_string(),
            age: 12,
            address: "1 Main St".to_string(),
            grade: 6,
            avatar: String::new(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_fixed_layout() {
        let doc = ExportDocument::from_student(&student("Ann"));
        let texts: Vec<_> = doc.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Student Information",
                "Name: Ann",
                "Age: 12",
                "Address: 1 Main St",
                "Grade: 6",
                "Created At: 2024-05-01 10:00:00 UTC",
            ]
        );
        let ys: Vec<_> = doc.lines.iter().map(|l| l.y_mm).collect();
        assert_eq!(ys, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert!(doc.lines.iter().all(|l| l.x_mm == 10.0));
        assert_eq!(doc.file_name, "Ann.pdf");
    }

    #[test]
    fn test_file_stem_sanitized() {
        assert_eq!(safe_file_stem("../etc/passwd"), ".._etc_passwd");
        assert_eq!(safe_file_stem("a:b*c?"), "a_b_c_");
        assert_eq!(safe_file_stem("Nguyễn Văn A"), "Nguyễn Văn A");
        assert_eq!(safe_file_stem("  "), "student");
        assert_eq!(safe_file_stem(".."), "student");
    }

    #[test]
    fn test_pdf_structure() {
        let pdf = ExportDocument::from_student(&student("O'Brien (Jr)")).to_pdf();
        let text = String::from_utf8_lossy(&pdf);

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("(Name: O'Brien \\(Jr\\)) Tj"));
        assert!(text.contains("/BaseFont /Helvetica"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = ExportDocument::from_student(&student("Ann")).to_pdf();
        let text = String::from_utf8_lossy(&pdf).into_owned();

        let xref_at = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref_at..]
            .lines()
            .skip(3)
            .take(5)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.into_iter().enumerate() {
            assert!(text[offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_non_latin_replaced() {
        assert_eq!(pdf_string_bytes("é漢"), vec![0xE9, b'?']);
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = ExportDocument::from_student(&student("Ann"))
            .write_to(dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("Ann.pdf"));
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
