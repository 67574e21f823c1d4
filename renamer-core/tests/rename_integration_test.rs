//! Integration tests for the rename workflow
//!
//! Tests the complete path: extract -> scan -> arbitrate -> truncate -> resolve -> rename

use chrono::{Local, TimeZone};
use filetime::FileTime;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use renamer_core::{
    extract_raw_text, get_file_description, ContentKind, PdfDocument, PdfSource, PlanAction, RawContent,
    RenameConfig, RenameError, RenamePlan, Renamer, Result, RunStats, Separator, SkipReason,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DATE: &str = "2024-02-14";

/// Write a file and pin its modification time to 2024-02-14 12:00 local time
fn write_dated(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    let noon = Local
        .with_ymd_and_hms(2024, 2, 14, 12, 0, 0)
        .single()
        .map(|t| t.timestamp())
        .unwrap_or_default();
    filetime::set_file_mtime(&path, FileTime::from_unix_time(noon, 0))?;
    Ok(path)
}

/// Minimal one-page PDF carrying only a metadata title
fn write_titled_pdf(path: &Path, title: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.save(path).unwrap();
}

/// Two-page PDF without metadata, one line of Courier text per page
fn write_two_page_pdf(path: &Path, first: &str, second: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = [first, second]
        .iter()
        .map(|text| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 2,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn dry_run() -> Renamer {
    Renamer::new(RenameConfig::new().with_dry_run(true))
}

fn new_names(plans: &[RenamePlan]) -> Vec<String> {
    plans.iter().filter(|p| p.is_rename()).filter_map(|p| p.new_name.clone()).collect()
}

#[test]
fn test_plain_text_description() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "test.txt", "This is a test file\nSecond line")?;

    assert_eq!(get_file_description(&path, Separator::Dash), "This-is-a-test-file");
    Ok(())
}

#[test]
fn test_content_beats_generic_original() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(
        dir.path(),
        "untitled.txt",
        "# Annual Sales Report\n\nThis document contains the sales analysis.",
    )?;

    assert_eq!(get_file_description(&path, Separator::Dash), "Annual-Sales-Report");
    Ok(())
}

#[test]
fn test_good_original_beats_noise() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "Financial_Summary_2024.txt", "import sys\n#comment\n1.")?;

    assert_eq!(get_file_description(&path, Separator::Dash), "Financial-Summary-2024");
    Ok(())
}

#[test]
fn test_all_caps_title() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "document.txt", "PROJECT ANALYSIS REPORT\n\nThis is the content.")?;

    assert_eq!(get_file_description(&path, Separator::Dash), "Project-Analysis-Report");
    Ok(())
}

#[test]
fn test_pdf_metadata_title() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("scan0001.pdf");
    write_titled_pdf(&path, "Sample PDF Document");

    let doc = PdfDocument::open(&path)?;
    assert_eq!(doc.metadata_title().as_deref(), Some("Sample PDF Document"));

    let raw = extract_raw_text(&path, ContentKind::Pdf)?;
    assert_eq!(raw, RawContent::Title("Sample PDF Document".into()));

    assert_eq!(get_file_description(&path, Separator::Dash), "Sample-PDF-Document");
    Ok(())
}

#[test]
fn test_pdf_page_text_is_first_page_only() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("scan0002.pdf");
    write_two_page_pdf(&path, "Quarterly Budget Review", "Appendix Tables");

    let doc = PdfDocument::open(&path)?;
    assert_eq!(doc.metadata_title(), None);
    let text = doc.first_page_text().unwrap_or_default();
    assert!(text.contains("Quarterly Budget Review"));
    assert!(!text.contains("Appendix"));

    assert_eq!(get_file_description(&path, Separator::Dash), "Quarterly-Budget-Review");
    Ok(())
}

#[test]
fn test_unreadable_content_uses_original_name() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("Budget Notes.txt");
    fs::write(&path, [0xff, 0xfe, 0xfd, 0x00])?;

    let err = extract_raw_text(&path, ContentKind::PlainText).unwrap_err();
    assert!(matches!(err, RenameError::ContentUnreadable { .. }));

    // fallback is the raw base name, not cleaned or scored
    assert_eq!(get_file_description(&path, Separator::Dash), "Budget Notes");
    Ok(())
}

#[test]
fn test_rename_directory_dry_run_then_live() -> Result<()> {
    let dir = TempDir::new()?;
    let file1 = write_dated(dir.path(), "test1.txt", "First test file")?;
    let file2 = write_dated(dir.path(), "test2.txt", "Second test file")?;

    let plans = dry_run().rename_directory(dir.path())?;
    assert_eq!(RunStats::from_plans(&plans).renamed, 2);
    assert!(file1.exists());
    assert!(file2.exists());

    let plans = Renamer::default().rename_directory(dir.path())?;
    assert_eq!(RunStats::from_plans(&plans).renamed, 2);
    assert!(!file1.exists());
    assert!(!file2.exists());
    assert!(dir.path().join(format!("{DATE} - First-test-file.txt")).exists());
    assert!(dir.path().join(format!("{DATE} - Second-test-file.txt")).exists());
    Ok(())
}

#[test]
fn test_collisions_within_batch() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "document1.txt", "# Project Report\n\nFirst document")?;
    write_dated(dir.path(), "document2.txt", "# Project Report\n\nSecond document")?;

    let plans = dry_run().rename_directory(dir.path())?;
    assert_eq!(
        new_names(&plans),
        vec![
            format!("{DATE} - Project-Report.txt"),
            format!("{DATE} - Project-Report-2.txt"),
        ]
    );
    Ok(())
}

#[test]
fn test_live_collisions_land_on_disk() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "document1.txt", "# Project Report\n\nFirst document")?;
    write_dated(dir.path(), "document2.txt", "# Project Report\n\nSecond document")?;

    Renamer::default().rename_directory(dir.path())?;
    assert!(dir.path().join(format!("{DATE} - Project-Report.txt")).exists());
    assert!(dir.path().join(format!("{DATE} - Project-Report-2.txt")).exists());
    Ok(())
}

#[test]
fn test_collision_with_different_extensions() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "doc.txt", "# Meeting Notes\n\nContent here")?;
    write_dated(dir.path(), "doc.md", "# Meeting Notes\n\nSame content")?;

    let names = new_names(&dry_run().rename_directory(dir.path())?);
    assert!(names.contains(&format!("{DATE} - Meeting-Notes.txt")));
    assert!(names.contains(&format!("{DATE} - Meeting-Notes.md")));
    assert!(names.iter().all(|n| !n.contains("Meeting-Notes-2")));
    Ok(())
}

#[test]
fn test_collision_with_existing_file_on_disk() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "draft.txt", "# Project Report\n\nBody")?;
    fs::write(dir.path().join(format!("{DATE} - Project-Report.txt")), "already here")?;

    let plans = dry_run().rename_directory(dir.path())?;
    let draft = plans
        .iter()
        .find(|p| p.original_name() == "draft.txt")
        .and_then(|p| p.new_name.clone());
    assert_eq!(draft, Some(format!("{DATE} - Project-Report-2.txt")));
    Ok(())
}

#[test]
fn test_hidden_files_skipped_by_default() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "document.txt", "Regular file content")?;
    write_dated(dir.path(), ".hidden_file.txt", "Hidden file content")?;
    write_dated(dir.path(), ".DS_Store", "System file content")?;

    let plans = dry_run().rename_directory(dir.path())?;
    let renamed: Vec<_> = plans.iter().filter(|p| p.is_rename()).map(|p| p.original_name()).collect();
    assert_eq!(renamed, vec!["document.txt"]);

    let hidden = plans
        .iter()
        .filter(|p| p.action == PlanAction::Skip(SkipReason::Hidden))
        .count();
    assert_eq!(hidden, 2);
    Ok(())
}

#[test]
fn test_hidden_files_included_when_requested() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "document.txt", "Regular file content")?;
    write_dated(dir.path(), ".hidden_file.txt", "Hidden file content")?;

    let renamer = Renamer::new(RenameConfig::new().with_dry_run(true).with_hidden(true));
    let plans = renamer.rename_directory(dir.path())?;
    let renamed: Vec<_> = plans.iter().filter(|p| p.is_rename()).map(|p| p.original_name()).collect();
    assert_eq!(renamed, vec![".hidden_file.txt", "document.txt"]);
    Ok(())
}

#[test]
fn test_skip_already_renamed_files() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "2025-06-21 - Some-Document.pdf", "Content here")?;
    write_dated(dir.path(), "untitled.txt", "Some content")?;

    let plans = dry_run().rename_directory(dir.path())?;
    let renamed: Vec<_> = plans.iter().filter(|p| p.is_rename()).map(|p| p.original_name()).collect();
    assert_eq!(renamed, vec!["untitled.txt"]);
    assert!(plans
        .iter()
        .any(|p| p.action == PlanAction::Skip(SkipReason::AlreadyRenamed)));
    Ok(())
}

#[test]
fn test_force_rename_already_renamed_files() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "2025-06-21 - Some-Document.txt", "# Quarterly Budget Report\n\nContent here")?;

    let renamer = Renamer::new(RenameConfig::new().with_dry_run(true).with_force_rename(true));
    let plans = renamer.rename_directory(dir.path())?;
    assert_eq!(new_names(&plans), vec![format!("{DATE} - Quarterly-Budget-Report.txt")]);
    Ok(())
}

#[test]
fn test_second_run_proposes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "notes.txt", "# Team Offsite Plan")?;
    write_dated(dir.path(), "scratch.md", "Budget Review:\n- numbers")?;

    let first = Renamer::default().rename_directory(dir.path())?;
    assert_eq!(RunStats::from_plans(&first).renamed, 2);

    let second = dry_run().rename_directory(dir.path())?;
    let stats = RunStats::from_plans(&second);
    assert_eq!(stats.renamed, 0);
    assert_eq!(stats.skipped, 2);
    Ok(())
}

#[test]
fn test_full_filename_truncation() -> Result<()> {
    let dir = TempDir::new()?;
    let title = format!("# {}That Would Exceed Filename Limits", "Very-Long-Word ".repeat(30));
    write_dated(dir.path(), "document.txt", &format!("{title}\n\nContent"))?;

    let renamer = Renamer::new(
        RenameConfig::new()
            .with_dry_run(true)
            .with_max_description_len(500)
            .with_max_filename_len(200),
    );
    let names = new_names(&renamer.rename_directory(dir.path())?);
    assert_eq!(names.len(), 1);

    let name = &names[0];
    assert!(name.chars().count() <= 200);
    assert!(name.starts_with(&format!("{DATE} - Very-Long-Word")));
    assert!(name.ends_with(".txt"));
    assert!(!name.trim_end_matches(".txt").ends_with('-'));
    Ok(())
}

#[test]
fn test_rename_single_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "document.txt", "# Project Analysis Report\n\nContent here")?;

    let plan = dry_run().rename_file(&path)?;
    assert!(plan.is_rename());
    assert!(path.exists());

    let plan = Renamer::default().rename_file(&path)?;
    assert!(plan.is_rename());
    assert!(!path.exists());
    let expected = dir.path().join(format!("{DATE} - Project-Analysis-Report.txt"));
    assert_eq!(plan.new_path(), Some(expected.clone()));
    assert!(expected.exists());
    Ok(())
}

#[test]
fn test_rename_single_file_already_renamed() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "2025-06-21 - Some-Document.txt", "Content here")?;

    let plan = dry_run().rename_file(&path)?;
    assert_eq!(plan.action, PlanAction::Skip(SkipReason::AlreadyRenamed));
    Ok(())
}

#[test]
fn test_run_dispatches_on_path_kind() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "a.txt", "# Alpha Plan")?;
    write_dated(dir.path(), "b.txt", "# Beta Plan")?;

    assert_eq!(dry_run().run(&path)?.len(), 1);
    assert_eq!(dry_run().run(dir.path())?.len(), 2);

    let err = dry_run().run(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, RenameError::PathNotFound(_)));
    Ok(())
}

#[test]
fn test_subdirectories_are_not_entered() -> Result<()> {
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join("nested"))?;
    write_dated(&dir.path().join("nested"), "inner.txt", "# Inner Report")?;
    write_dated(dir.path(), "outer.txt", "# Outer Report")?;

    let plans = dry_run().rename_directory(dir.path())?;
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].original_name(), "outer.txt");
    Ok(())
}

#[test]
fn test_bare_header_mark_keeps_original_name() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_dated(dir.path(), "notes.txt", "#\nQuarterly Budget Review")?;

    assert_eq!(get_file_description(&path, Separator::Dash), "notes");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_failed_rename_does_not_stop_batch() -> Result<()> {
    let dir = TempDir::new()?;
    write_dated(dir.path(), "b.txt", "# Beta Plan")?;
    // description alone is ~300 bytes, past the usual 255-byte name limit
    let long = write_dated(dir.path(), "x.txt", &format!("# {}", "Word ".repeat(60)))?;

    let renamer = Renamer::new(
        RenameConfig::new()
            .with_max_description_len(400)
            .with_max_filename_len(400),
    );
    let plans = renamer.rename_directory(dir.path())?;
    assert_eq!(plans.len(), 2);

    let stats = RunStats::from_plans(&plans);
    assert_eq!(stats.renamed, 1);
    assert_eq!(stats.errors, 1);

    let renamed = plans.iter().find(|p| p.is_rename()).unwrap();
    assert_eq!(renamed.original_name(), "b.txt");
    assert!(dir.path().join(format!("{DATE} - Beta-Plan.txt")).exists());

    let failed = plans.iter().find(|p| p.is_error()).unwrap();
    assert_eq!(failed.original_name(), "x.txt");
    match &failed.action {
        PlanAction::Error(message) => assert!(message.contains("Failed to rename")),
        other => panic!("expected an error plan, got {:?}", other),
    }
    assert!(long.exists());
    Ok(())
}
