//! Accumulates the generated C source

use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Collects emitted C into two buffers. The header holds boilerplate and declarations, the code
/// holds statements in source order.
///
/// Buffers are append only, the complete output is always `header + code`.
#[derive(Debug, Clone)]
pub struct Emitter {
    path: PathBuf,
    header: String,
    code: String,
}

impl Emitter {
    /// Creates a new emitter that will write its output to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            header: String::new(),
            code: String::new(),
        }
    }

    /// Appends a fragment to the code
    pub fn emit(&mut self, fragment: &str) {
        self.code.push_str(fragment);
    }

    /// Appends a fragment to the code, ending the line
    pub fn emit_line(&mut self, fragment: &str) {
        self.code.push_str(fragment);
        self.code.push('\n');
    }

    /// Appends a line to the header
    pub fn header_line(&mut self, fragment: &str) {
        debug!("header: {fragment}");
        self.header.push_str(fragment);
        self.header.push('\n');
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Where [`write_output`](Self::write_output) writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the complete output
    pub fn output(&self) -> String {
        format!("{}{}", self.header, self.code)
    }

    /// Writes the complete output to a writer
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.header.as_bytes())?;
        writer.write_all(self.code.as_bytes())?;
        writer.flush()
    }

    /// Writes the complete output to this emitter's path
    pub fn write_output(&self) -> io::Result<()> {
        let file = File::create(&self.path)?;
        self.write_to(BufWriter::new(file))?;
        info!("wrote {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_buffers_are_separate() {
        let mut emitter = Emitter::new("out.c");
        emitter.header_line("#include <stdio.h>");
        emitter.emit("a = ");
        emitter.emit("1");
        emitter.emit_line(";");
        emitter.header_line("float a;");
        assert_eq!(emitter.header(), "#include <stdio.h>\nfloat a;\n");
        assert_eq!(emitter.code(), "a = 1;\n");
        assert_eq!(emitter.output(), "#include <stdio.h>\nfloat a;\na = 1;\n");
    }

    #[test]
    fn test_write_to() {
        let mut emitter = Emitter::new("out.c");
        emitter.header_line("int main(){");
        emitter.emit_line("}");
        let mut buffer = Vec::new();
        emitter.write_to(&mut buffer).expect("could not write");
        assert_eq!(buffer, b"int main(){\n}\n");
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let path = dir.path().join("out.c");
        let mut emitter = Emitter::new(&path);
        emitter.header_line("int main(){");
        emitter.emit_line("return 0;");
        emitter.write_output().expect("could not write output");
        let written = std::fs::read_to_string(&path).expect("could not read output");
        assert_eq!(written, "int main(){\nreturn 0;\n");
    }
}
