use test_log::test;
use tracing::info;
use yoloc::Yoloc;

mod common;

#[test]
fn test_compile_single_file() -> eyre::Result<()> {
    let dir = common::target_dir();
    info!("compiling to {dir:?}");
    let source = dir.join("count.yolo");
    std::fs::write(&source, "LET a = 0\nWHILE (a < 3) REPEAT\nLET a = a + 1\nENDWHILE\nPRINT a\n")?;

    let output = dir.join("count.c");
    let yoloc = Yoloc::builder()
        .output(&output)
        .build()
        .expect("could not create yoloc");
    let compilation = yoloc.compile(&source)?;

    assert_eq!(std::fs::read_to_string(&output)?, compilation.output());
    Ok(())
}

#[test]
fn test_failed_compilation_writes_nothing() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("broken.yolo");
    std::fs::write(&source, "GOTO nowhere\n")?;

    let output = dir.path().join("broken.c");
    let graph = dir.path().join("broken.dot");
    let yoloc = Yoloc::builder().output(&output).graph(&graph).build()?;
    assert!(yoloc.compile(&source).is_err());
    assert!(!output.exists());
    assert!(!graph.exists());
    Ok(())
}

#[test]
fn test_graph_is_written() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("hello.yolo");
    std::fs::write(&source, "PRINT \"hi\"\n")?;

    let graph = dir.path().join("hello.dot");
    let yoloc = Yoloc::builder()
        .output(dir.path().join("hello.c"))
        .graph(&graph)
        .build()?;
    yoloc.compile(&source)?;

    let dot = std::fs::read_to_string(&graph)?;
    assert!(dot.starts_with("digraph"), "{dot}");
    assert!(dot.contains("STATEMENT-PRINT"), "{dot}");
    Ok(())
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let yoloc = Yoloc::builder()
        .output(dir.path().join("out.c"))
        .build()
        .unwrap();
    let error = yoloc
        .compile(&dir.path().join("does_not_exist.yolo"))
        .expect_err("should not compile");
    assert!(matches!(error.kind(), yoloc::ErrorKind::Io(_)));
}
