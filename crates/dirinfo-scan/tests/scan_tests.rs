use dirinfo_scan::{Aggregator, ScanConfig, WarningKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_sized(path: &Path, len: usize) {
    fs::write(path, vec![b'x'; len]).unwrap();
}

fn create_test_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(root.join("C/deep/deeper")).unwrap();
    fs::create_dir(root.join("A")).unwrap();
    fs::create_dir(root.join("B")).unwrap();

    write_sized(&root.join("A/one.txt"), 100);
    write_sized(&root.join("A/two.TXT"), 200);
    write_sized(&root.join("A/README"), 300);
    write_sized(&root.join("C/deep/archive.tar.gz"), 1000);
    write_sized(&root.join("C/deep/deeper/.gitignore"), 10);
    write_sized(&root.join("top.rs"), 50);

    temp
}

#[test]
fn test_count_independent_of_nesting() {
    let temp = create_test_tree();
    let count = Aggregator::new().count_total_files(temp.path());

    assert_eq!(count.value, 6);
    assert!(count.is_complete());
}

#[test]
fn test_directory_size_sums_files() {
    let temp = create_test_tree();
    let aggregator = Aggregator::new();

    assert_eq!(aggregator.directory_size(temp.path()).value, 1660);

    // A zero-byte file changes nothing.
    fs::write(temp.path().join("B/empty"), "").unwrap();
    assert_eq!(aggregator.directory_size(temp.path()).value, 1660);
}

#[test]
fn test_size_zero_after_removing_only_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("only.bin");
    write_sized(&file, 4096);

    let aggregator = Aggregator::new();
    assert_eq!(aggregator.directory_size(temp.path()).value, 4096);

    fs::remove_file(&file).unwrap();
    assert_eq!(aggregator.directory_size(temp.path()).value, 0);
}

#[test]
fn test_extension_histogram() {
    let temp = create_test_tree();
    let histogram = Aggregator::new().histogram(temp.path()).value;

    assert_eq!(histogram.count(".txt"), 2);
    assert_eq!(histogram.count(".gz"), 1);
    assert_eq!(histogram.count(".rs"), 1);
    assert_eq!(histogram.count("(no extension)"), 2);
    assert_eq!(histogram.total(), 6);
}

#[test]
fn test_top_extensions_rank_and_share() {
    let temp = create_test_tree();
    let top = Aggregator::new().extension_histogram(temp.path(), 2).value;

    assert_eq!(top.len(), 2);
    // ".txt" and "(no extension)" tie at 2; labels break the tie.
    assert_eq!(top[0].extension.as_str(), "(no extension)");
    assert_eq!(top[1].extension.as_str(), ".txt");
    assert!((top[0].percentage - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_subfolders_sorted_with_recursive_counts() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    // Created out of order on purpose.
    fs::create_dir(root.join("C")).unwrap();
    fs::create_dir(root.join("A")).unwrap();
    fs::create_dir(root.join("B")).unwrap();
    fs::create_dir(root.join("A/nested")).unwrap();
    write_sized(&root.join("A/1"), 1);
    write_sized(&root.join("A/2"), 1);
    write_sized(&root.join("A/nested/3"), 1);
    write_sized(&root.join("C/1"), 5);
    write_sized(&root.join("C/2"), 5);

    let subfolders = Aggregator::new().enumerate_immediate_subfolders(root);
    assert!(subfolders.is_complete());

    let names: Vec<&str> = subfolders.value.iter().map(|s| s.name.as_str()).collect();
    let counts: Vec<u64> = subfolders.value.iter().map(|s| s.file_count).collect();
    let sizes: Vec<u64> = subfolders.value.iter().map(|s| s.size).collect();

    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(counts, vec![3, 0, 2]);
    assert_eq!(sizes, vec![3, 0, 10]);
    assert_eq!(subfolders.value[0].path, root.join("A"));
}

#[test]
fn test_analyze_single_pass_matches_operations() {
    let temp = create_test_tree();
    let config = ScanConfig::builder()
        .root(temp.path())
        .top_extensions(3usize)
        .build()
        .unwrap();
    let aggregator = Aggregator::with_config(config);

    let report = aggregator.analyze();
    assert_eq!(report.total_files, aggregator.count_total_files(temp.path()).value);
    assert_eq!(report.total_size, aggregator.directory_size(temp.path()).value);
    assert_eq!(report.top_extensions.len(), 3);
    assert_eq!(report.subfolders.len(), 3);
    assert!(!report.has_warnings());
}

#[cfg(unix)]
#[test]
fn test_permission_denied_subtree_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("open/inner")).unwrap();
    fs::create_dir(root.join("locked")).unwrap();
    write_sized(&root.join("open/a"), 1);
    write_sized(&root.join("open/inner/b"), 1);
    write_sized(&root.join("locked/hidden"), 1);

    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still read the directory.
    let enforced = fs::read_dir(&locked).is_err();

    let count = Aggregator::new().count_total_files(root);
    let report = Aggregator::with_config(ScanConfig::new(root)).analyze();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(count.value >= 2);
    if enforced {
        assert_eq!(count.value, 2);
        assert_eq!(count.warnings.len(), 1);
        assert_eq!(count.warnings[0].kind, WarningKind::PermissionDenied);
        assert_eq!(count.warnings[0].path, locked);

        // The locked folder is still listed, and its warning is reported once.
        assert_eq!(report.subfolders.len(), 2);
        assert_eq!(report.warnings.len(), 1);
    } else {
        assert_eq!(count.value, 3);
        assert!(count.is_complete());
    }
}

#[cfg(unix)]
#[test]
fn test_every_denied_path_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for dir in ["x", "y", "z"] {
        fs::create_dir(root.join(dir)).unwrap();
        write_sized(&root.join(dir).join("f"), 1);
    }
    for dir in ["x", "z"] {
        fs::set_permissions(root.join(dir), fs::Permissions::from_mode(0o000)).unwrap();
    }
    let enforced = fs::read_dir(root.join("x")).is_err();

    let count = Aggregator::new().count_total_files(root);

    for dir in ["x", "z"] {
        fs::set_permissions(root.join(dir), fs::Permissions::from_mode(0o755)).unwrap();
    }

    if enforced {
        assert_eq!(count.value, 1);
        let paths: Vec<_> = count.warnings.iter().map(|w| w.path.clone()).collect();
        assert_eq!(paths, vec![root.join("x"), root.join("z")]);
    } else {
        assert_eq!(count.value, 3);
    }
}
