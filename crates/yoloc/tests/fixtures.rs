use std::path::PathBuf;
use test_log::test;
use tracing::info;
use yoloc::Yoloc;

mod common;

fn yolo_fixtures() -> Vec<PathBuf> {
    let mut fixtures = std::fs::read_dir(common::fixtures_dir().join("yolo"))
        .expect("could not read fixtures")
        .map(|entry| entry.expect("could not read entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yolo"))
        .collect::<Vec<_>>();
    fixtures.sort();
    fixtures
}

#[test]
fn test_fixtures_compile_to_expected_c() -> eyre::Result<()> {
    let yoloc = Yoloc::builder().build()?;
    let fixtures = yolo_fixtures();
    assert!(!fixtures.is_empty(), "no fixtures found");

    for yolo in fixtures {
        let stem = yolo.file_stem().expect("fixture has no name");
        let c = common::fixtures_dir()
            .join("c")
            .join(stem)
            .with_extension("c");
        info!("checking {yolo:?} against {c:?}");

        let source = std::fs::read_to_string(&yolo)?;
        let expected = std::fs::read_to_string(&c)?;
        let compilation = yoloc
            .compile_str(&source)
            .unwrap_or_else(|e| panic!("{yolo:?} failed to compile:\n{}", e.render(&source)));
        assert_eq!(compilation.output(), expected, "mismatch for {yolo:?}");
    }
    Ok(())
}

#[test]
fn test_every_fixture_has_expected_output() {
    for yolo in yolo_fixtures() {
        let stem = yolo.file_stem().expect("fixture has no name");
        let c = common::fixtures_dir().join("c").join(stem).with_extension("c");
        assert!(c.exists(), "{yolo:?} has no expected output at {c:?}");
    }
}
