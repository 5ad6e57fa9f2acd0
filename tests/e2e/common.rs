//! Shared setup for runs against the stub toolkit

use fondscan_harness::stubs::StubToolkit;
use fondscan_harness::{Invocation, InvocationOutput, Mode, OutputFixture};
use std::fs;
use std::path::{Path, PathBuf};

pub const CLI_BINARY: &str = env!("CARGO_BIN_EXE_fondscan");
pub const TEST_FILES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test-data/files");
pub const BASENAME: &str = "test";

/// A finished run; the fixture and stubs live as long as this does
pub struct Run {
    pub fixture: OutputFixture,
    pub output: InvocationOutput,
    _stubs: StubToolkit,
}

impl Run {
    pub fn output_dir(&self) -> PathBuf {
        self.fixture.output_dir(BASENAME)
    }

    pub fn virus_log(&self) -> PathBuf {
        self.output_dir().join("logs").join("viruscheck-log.txt")
    }
}

/// Run the CLI on `input` with every external tool stubbed
pub fn run_stubbed(input: &Path, mode: Mode, extra_args: &[&str]) -> Run {
    fondscan_harness::logging::init_test_log();
    let stubs = StubToolkit::new().unwrap();
    let fixture = OutputFixture::new().unwrap();

    let mut invocation = Invocation::new(CLI_BINARY, input, fixture.root(), BASENAME)
        .mode(mode)
        .env("PATH", stubs.path_env().unwrap());
    for arg in extra_args {
        invocation = invocation.arg(arg);
    }
    let output = invocation.run().unwrap();

    Run {
        fixture,
        output,
        _stubs: stubs,
    }
}

/// Placeholder image file; the stubbed Sleuth Kit tools never read it
pub fn stub_disk_image(dir: &Path) -> PathBuf {
    let image = dir.join("diskimage.img");
    fs::write(&image, vec![0u8; 4096]).unwrap();
    image
}
