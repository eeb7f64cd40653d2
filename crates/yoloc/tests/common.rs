use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A fresh directory under cargo's temporary target directory
#[allow(dead_code)]
pub fn target_dir() -> PathBuf {
    let target = Path::new(env!("CARGO_TARGET_TMPDIR"));
    let buf = target.join(format!(
        "target-{:?}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos()
    ));
    std::fs::create_dir_all(&buf).expect("could not create directory");
    buf
}

/// The directory holding paired `yolo/*.yolo` and `c/*.c` fixtures
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}
