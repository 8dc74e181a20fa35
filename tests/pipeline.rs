use file_extract::{run_extraction, ExtensionSet, ExtractConfig};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

fn config(src: &Path, dest: &Path, exts: &[&str]) -> ExtractConfig {
    ExtractConfig::new(src, dest, ExtensionSet::normalize(exts.iter().copied()))
}

#[tokio::test]
async fn nested_tree_copies_only_matching_extensions() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    fs::write(src.path().join("a.pdf"), b"alpha").unwrap();
    fs::write(src.path().join("b.txt"), b"beta").unwrap();
    fs::create_dir(src.path().join("c")).unwrap();
    fs::write(src.path().join("c/d.pdf"), b"delta").unwrap();

    let report = run_extraction(&config(src.path(), dest.path(), &["pdf"]))
        .await
        .unwrap();

    let sources: BTreeSet<_> = report
        .copied_files
        .iter()
        .map(|f| f.source.clone())
        .collect();
    let expected: BTreeSet<_> = [
        src.path().join("a.pdf"),
        src.path().join("c/d.pdf"),
    ]
    .iter()
    .map(|p| p.to_string_lossy().to_string())
    .collect();
    assert_eq!(sources, expected);

    assert_eq!(fs::read(dest.path().join("a.pdf")).unwrap(), b"alpha");
    assert_eq!(fs::read(dest.path().join("d.pdf")).unwrap(), b"delta");
    assert!(!dest.path().join("b.txt").exists());
}

#[tokio::test]
async fn occupied_destination_name_gets_renamed_variant() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    fs::write(src.path().join("doc.pdf"), b"fresh").unwrap();
    fs::write(dest.path().join("doc.pdf"), b"stale").unwrap();

    let report = run_extraction(&config(src.path(), dest.path(), &["pdf"]))
        .await
        .unwrap();
    assert_eq!(report.copied_count(), 1);

    assert_eq!(fs::read(dest.path().join("doc.pdf")).unwrap(), b"stale");
    let renamed: Vec<_> = fs::read_dir(dest.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("doc_copy_") && n.ends_with(".pdf"))
        .collect();
    assert_eq!(renamed.len(), 1);
    assert_eq!(fs::read(dest.path().join(&renamed[0])).unwrap(), b"fresh");
}

#[tokio::test]
async fn missing_source_root_fails_the_run() {
    let scratch = tempfile::tempdir().unwrap();
    let missing = scratch.path().join("no-such-root");
    let dest = scratch.path().join("out");

    let result = run_extraction(&config(&missing, &dest, &["pdf"])).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn thousand_concurrent_copies_all_arrive() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    for i in 0..1000 {
        fs::write(
            src.path().join(format!("file_{i:04}.dat")),
            format!("payload {i}"),
        )
        .unwrap();
    }

    let report = run_extraction(&config(src.path(), dest.path(), &["dat"]))
        .await
        .unwrap();

    assert_eq!(report.copied_count(), 1000);
    assert!(report.failures.is_empty());
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 1000);
    assert_eq!(
        fs::read(dest.path().join("file_0042.dat")).unwrap(),
        b"payload 42"
    );
}

#[tokio::test]
async fn identical_base_names_race_to_distinct_destinations() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let mut payloads = BTreeSet::new();
    for sub in ["a", "b", "c", "d"] {
        fs::create_dir(src.path().join(sub)).unwrap();
        let payload = format!("from {sub}");
        fs::write(src.path().join(sub).join("same.pdf"), &payload).unwrap();
        payloads.insert(payload);
    }

    let report = run_extraction(&config(src.path(), dest.path(), &["pdf"]))
        .await
        .unwrap();

    assert_eq!(report.copied_count(), 4);
    assert!(report.failures.is_empty());

    // all four land, none clobbered, contents preserved
    let mut found = BTreeSet::new();
    for entry in fs::read_dir(dest.path()).unwrap() {
        let entry = entry.unwrap();
        found.insert(String::from_utf8(fs::read(entry.path()).unwrap()).unwrap());
    }
    assert_eq!(found, payloads);
}

#[tokio::test]
async fn single_file_source_root_is_copied() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let file = src.path().join("lone.pdf");
    fs::write(&file, b"solo").unwrap();

    let report = run_extraction(&config(&file, dest.path(), &["pdf"]))
        .await
        .unwrap();

    assert_eq!(report.copied_count(), 1);
    assert_eq!(fs::read(dest.path().join("lone.pdf")).unwrap(), b"solo");
}
