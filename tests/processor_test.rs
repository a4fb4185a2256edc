use mason::config::Config;
use mason::names::TargetNames;
use mason::processor::{decode_text, ensure_disjoint_roots, CopyStats, Processor};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Lays out a small template tree exercising renaming, rewriting, binary
/// copying and exclusions.
fn build_template(root: &Path) {
    fs::create_dir_all(root.join("demo_app22_67948").join("src")).unwrap();
    fs::write(root.join("demo_app22_67948_config.txt"), "App: Demo App22").unwrap();
    fs::write(
        root.join("demo_app22_67948").join("src").join("app.py"),
        "import demo_app22_67948\nURL = \"https://demo-app22-67948.example.com\"\nTITLE = \"Demo App22\"\n",
    )
    .unwrap();
    fs::write(root.join("logo.png"), [0x89u8, 0x50, 0x4e, 0x47, 0x00, 0xff, 0xfe]).unwrap();
    fs::create_dir_all(root.join("node_modules").join("pkg")).unwrap();
    fs::write(root.join("node_modules").join("pkg").join("index.js"), "x").unwrap();
    fs::write(root.join("module.pyc"), "bytecode").unwrap();
}

fn scaffold_into(template: &Path, output: &Path) -> CopyStats {
    let config = Config::default();
    let names = TargetNames::derive("My Cool App").unwrap();
    let processor = Processor::new(template, output, &config, &names).unwrap();
    fs::create_dir_all(output).unwrap();
    processor.copy_tree()
}

#[test]
fn test_scaffold_renames_and_rewrites() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();
    build_template(&template);

    let stats = scaffold_into(&template, &output);

    let config = output.join("my_cool_app_config.txt");
    assert_eq!(fs::read_to_string(config).unwrap(), "App: My Cool App");

    let app = output.join("my_cool_app").join("src").join("app.py");
    assert_eq!(
        fs::read_to_string(app).unwrap(),
        "import my_cool_app\nURL = \"https://my-cool-app.example.com\"\nTITLE = \"My Cool App\"\n"
    );

    assert_eq!(stats.failures, 0);
    assert_eq!(stats.fallbacks, 0);
    assert_eq!(stats.dirs_created, 2);
    assert_eq!(stats.files_copied, 1);
    assert_eq!(stats.files_rewritten, 2);
}

#[test]
fn test_binary_files_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();
    build_template(&template);

    scaffold_into(&template, &output);

    // Name untouched, bytes untouched, even though the payload is not UTF-8.
    assert_eq!(
        fs::read(output.join("logo.png")).unwrap(),
        fs::read(template.join("logo.png")).unwrap()
    );
}

#[test]
fn test_excluded_entries_are_absent() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();
    build_template(&template);

    scaffold_into(&template, &output);

    assert!(!output.join("node_modules").exists());
    assert!(!output.join("module.pyc").exists());
}

#[test]
fn test_no_template_tokens_remain() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();
    build_template(&template);

    scaffold_into(&template, &output);

    let config = Config::default();
    for entry in walkdir::WalkDir::new(&output) {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy();
        assert!(!name.contains(&config.tokens.snake), "token in name: {}", name);
        assert!(!name.contains(&config.tokens.kebab), "token in name: {}", name);

        if entry.file_type().is_file() && entry.path().extension() != Some("png".as_ref()) {
            let content = fs::read_to_string(entry.path()).unwrap();
            assert!(!content.contains(&config.tokens.snake));
            assert!(!content.contains(&config.tokens.kebab));
            assert!(!content.contains(&config.tokens.display));
        }
    }
}

#[test]
fn test_clean_reruns_produce_identical_trees() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    fs::create_dir_all(&template).unwrap();
    build_template(&template);

    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");
    scaffold_into(&template, &first);
    scaffold_into(&template, &second);

    assert!(!dir_diff::is_different(&first, &second).unwrap());
}

#[test]
fn test_invalid_utf8_sequences_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();

    let mut bytes = b"App: Demo App22\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"tail\n");
    fs::write(template.join("notes.txt"), bytes).unwrap();

    scaffold_into(&template, &output);

    assert_eq!(
        fs::read_to_string(output.join("notes.txt")).unwrap(),
        "App: My Cool App\ntail\n"
    );
}

#[test]
fn test_decode_text() {
    assert_eq!(decode_text(b"plain"), "plain");
    assert_eq!(decode_text(b"a\xff\xfeb"), "ab");
    assert_eq!(decode_text("héllo".as_bytes()), "héllo");
    // Truncated multi-byte sequence at the end of input
    assert_eq!(decode_text(b"ok\xc3"), "ok");
    assert_eq!(decode_text(b""), "");
}

#[test]
fn test_classification() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();
    build_template(&template);

    let config = Config::default();
    let names = TargetNames::derive("My Cool App").unwrap();
    let processor = Processor::new(&template, &output, &config, &names).unwrap();

    assert!(processor.is_binary(Path::new("logo.png")));
    assert!(processor.is_binary(Path::new("LOGO.PNG")));
    assert!(!processor.is_binary(Path::new("app.py")));
    assert!(!processor.is_binary(Path::new("Makefile")));

    assert!(processor.is_excluded(std::ffi::OsStr::new("node_modules")));
    assert!(processor.is_excluded(std::ffi::OsStr::new("module.pyc")));
    assert!(!processor.is_excluded(std::ffi::OsStr::new("src")));

    let target = processor
        .target_path(&template.join("demo_app22_67948").join("src").join("app.py"))
        .unwrap();
    assert_eq!(target, output.join("my_cool_app").join("src").join("app.py"));

    assert!(processor.target_path(temp_dir.path()).is_err());
}

#[test]
fn test_overlapping_roots_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    fs::create_dir_all(&template).unwrap();

    assert!(ensure_disjoint_roots(&template, &template.join("output")).is_err());
    assert!(ensure_disjoint_roots(&template, &template).is_err());
    assert!(ensure_disjoint_roots(&template.join("nested"), &template).is_err());
    assert!(ensure_disjoint_roots(&template, &temp_dir.path().join("output")).is_ok());
}

#[cfg(unix)]
#[test]
fn test_permissions_are_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&template).unwrap();

    let script = template.join("run.sh");
    fs::write(&script, "#!/bin/sh\necho demo_app22_67948\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    scaffold_into(&template, &output);

    let mode = fs::metadata(output.join("run.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert_eq!(
        fs::read_to_string(output.join("run.sh")).unwrap(),
        "#!/bin/sh\necho my_cool_app\n"
    );
}
