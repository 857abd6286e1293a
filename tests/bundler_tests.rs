use kodegen_bundler_script::bundler::{
    AppBundle, BundleConfig, Destination, InfoPlist, TypeRole, build, clean_executable_name,
    is_valid_domain,
};
use std::path::{Path, PathBuf};

fn write_script(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\necho bundled\n").expect("write script");
    path
}

fn write_png(path: &Path, side: u32) {
    let img = image::RgbaImage::from_pixel(side, side, image::Rgba([10, 120, 200, 255]));
    img.save(path).expect("save png");
}

fn read_info(app: &Path) -> InfoPlist {
    InfoPlist::from_file(&app.join("Contents/Info.plist")).expect("Info.plist")
}

#[tokio::test]
async fn test_default_bundle_layout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");

    let app = AppBundle::new(&script)
        .await
        .expect("bundle")
        .write()
        .await
        .expect("write");

    assert_eq!(app, tmp.path().join("app.app"));
    assert!(app.join("Contents/Resources").is_dir());

    let staged = app.join("Contents/MacOS/app");
    assert_eq!(
        std::fs::read(&staged).expect("staged"),
        std::fs::read(&script).expect("source")
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&staged).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    let value = plist::Value::from_file(app.join("Contents/Info.plist")).expect("plist");
    let dict = value.as_dictionary().expect("dictionary");
    assert_eq!(
        dict.get("CFBundleExecutable").and_then(|v| v.as_string()),
        Some("app")
    );
    assert_eq!(
        dict.get("CFBundleIdentifier").and_then(|v| v.as_string()),
        Some("org.kodegen.app")
    );
    assert_eq!(
        dict.get("CFBundleDisplayName").and_then(|v| v.as_string()),
        Some("app.app")
    );
}

#[tokio::test]
async fn test_info_plist_is_binary() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");
    let app = build(&BundleConfig::new(&script))
        .await
        .expect("build")
        .materialize()
        .await
        .expect("materialize");

    let bytes = std::fs::read(app.join("Contents/Info.plist")).expect("read");
    assert!(bytes.starts_with(b"bplist00"));
}

#[tokio::test]
async fn test_source_is_left_untouched_and_name_is_cleaned() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "my tool (v2).sh");
    let before = std::fs::read(&script).expect("read");

    let app = AppBundle::new(&script)
        .await
        .expect("bundle")
        .write()
        .await
        .expect("write");

    assert_eq!(app, tmp.path().join("mytoolv2.sh.app"));
    assert!(app.join("Contents/MacOS/mytoolv2.sh").is_file());
    assert_eq!(std::fs::read(&script).expect("read"), before);
    assert_eq!(read_info(&app).executable, "mytoolv2.sh");
}

#[test]
fn test_cleaned_names_are_subsets() {
    for name in ["app", "a b c", "tool_v1.2!", "weird$$name-3", "über.py", ""] {
        let cleaned = clean_executable_name(name);
        assert!(
            cleaned
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        );
        assert!(cleaned.chars().all(|c| name.contains(c)));
    }
}

#[tokio::test]
async fn test_identifier_written_only_when_valid() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");

    for suffix in ["tool", "Tool-2", "a.b", "a--b", "a..b", "under_score"] {
        let mut bundle = AppBundle::new(&script).await.expect("bundle");
        let expected = format!("org.kodegen.{suffix}");
        match bundle.set_identifier(suffix) {
            Ok(()) => {
                assert!(is_valid_domain(&expected));
                let app = bundle.write().await.expect("write");
                assert_eq!(read_info(&app).identifier, expected);
            }
            Err(_) => assert!(!is_valid_domain(&expected)),
        }
    }
}

#[tokio::test]
async fn test_second_write_leaves_only_second_configuration() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");
    let png = tmp.path().join("icon.png");
    write_png(&png, 32);

    let mut first = AppBundle::new(&script).await.expect("bundle");
    first.set_icon(&png).await.expect("icon");
    first.set_extension("foo").expect("extension");
    let app = first.write().await.expect("first write");
    assert!(app.join("Contents/Resources/icon.png.icns").is_file());

    let second = AppBundle::new(&script).await.expect("bundle");
    let app = second.write().await.expect("second write");

    assert!(!app.join("Contents/Resources/icon.png.icns").exists());
    let info = read_info(&app);
    assert!(info.icon_file.is_none());
    assert!(info.document_types.is_empty());
    assert!(info.exported_types.is_empty());
}

#[tokio::test]
async fn test_extension_declares_viewer_datafile() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");

    let mut bundle = AppBundle::new(&script).await.expect("bundle");
    bundle.set_extension("foo").expect("extension");
    let app = bundle.write().await.expect("write");

    let info = read_info(&app);
    let document = &info.document_types[0];
    assert_eq!(document.role, TypeRole::Viewer);
    assert_eq!(document.content_types, ["org.kodegen.app.datafile"]);
    assert_eq!(document.type_name, "app.app datafile");

    let exported = &info.exported_types[0];
    assert_eq!(exported.identifier, "org.kodegen.app.datafile");
    assert_eq!(exported.tag_specification.filename_extension, "foo");
    assert_eq!(exported.conforms_to, "public.data");
    assert_eq!(exported.description, "app.app datafile");
}

#[tokio::test]
async fn test_type_role_applies_to_next_extension_only() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");

    let mut bundle = AppBundle::new(&script).await.expect("bundle");
    bundle.set_extension("foo").expect("extension");
    bundle.set_type_role(TypeRole::Editor);
    assert_eq!(bundle.info().document_types[0].role, TypeRole::Viewer);
    assert_eq!(
        bundle.info().exported_types[0]
            .tag_specification
            .filename_extension,
        "foo"
    );

    bundle.set_extension("foo").expect("extension");
    assert_eq!(bundle.info().document_types[0].role, TypeRole::Editor);
}

#[tokio::test]
async fn test_icon_is_referenced_by_file_name() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");
    let png = tmp.path().join("icon.png");
    write_png(&png, 64);

    let config = BundleConfig {
        icon: Some(png),
        ..BundleConfig::new(&script)
    };
    let app = build(&config)
        .await
        .expect("build")
        .materialize()
        .await
        .expect("materialize");

    let icns = app.join("Contents/Resources/icon.png.icns");
    let family = icns::IconFamily::read(std::fs::File::open(&icns).expect("open icns"))
        .expect("parse icns");
    assert!(!family.available_icons().is_empty());
    assert_eq!(read_info(&app).icon_file.as_deref(), Some("icon.png.icns"));
}

#[tokio::test]
async fn test_undecodable_icon_fails_without_output() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");
    let png = tmp.path().join("broken.png");
    std::fs::write(&png, b"not an image").expect("write");

    let config = BundleConfig {
        icon: Some(png),
        ..BundleConfig::new(&script)
    };
    let err = build(&config).await.expect_err("decode must fail");
    assert!(matches!(
        err.root(),
        kodegen_bundler_script::bundler::Error::ImageFormat { .. }
    ));
    assert!(!tmp.path().join("app.app").exists());
}

#[tokio::test]
async fn test_missing_source() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = AppBundle::new(&tmp.path().join("nope"))
        .await
        .expect_err("missing source");
    assert!(matches!(
        err,
        kodegen_bundler_script::bundler::Error::SourceNotFound { .. }
    ));
}

#[tokio::test]
async fn test_destinations() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");

    let mut bundle = AppBundle::new(&script).await.expect("bundle");
    assert_eq!(bundle.output_path().ok(), Some(tmp.path().join("app.app")));

    bundle.set_destination(Destination::System);
    assert_eq!(
        bundle.output_path().ok(),
        Some(PathBuf::from("/Applications/app.app"))
    );

    bundle.set_filename("Renamed");
    bundle.set_destination(Destination::User);
    if let Some(home) = dirs::home_dir() {
        assert_eq!(
            bundle.output_path().ok(),
            Some(home.join("Applications/Renamed.app"))
        );
    }
}

#[tokio::test]
async fn test_custom_namespace() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let script = write_script(tmp.path(), "app");

    let config = BundleConfig {
        namespace: "example".into(),
        identifier_suffix: Some("tool".into()),
        ..BundleConfig::new(&script)
    };
    let layout = build(&config).await.expect("build");
    let info =
        InfoPlist::from_bytes(layout.tree.file("Contents/Info.plist").expect("plist")).expect("parse");
    assert_eq!(info.identifier, "org.example.tool");
}
