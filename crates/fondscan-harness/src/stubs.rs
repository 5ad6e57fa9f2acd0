//! Shell stand-ins for the external tools
//!
//! The real toolchain (siegfried, ClamAV, The Sleuth Kit, fiwalk, tree) is
//! rarely installed on CI machines. These scripts print output in the same
//! shape as the real tools so the CLI can be exercised end to end; put
//! [`StubToolkit::path_env`] in the child's `PATH` to use them.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SF: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "siegfried 1.11.0 (stub)"
    exit 0
fi
for last; do :; done
echo "filename,filesize,modified,errors,md5,namespace,id,format,version,mime,basis,warning"
find "$last" -type f | sort | while IFS= read -r f; do
    size=$(wc -c < "$f" | tr -d ' ')
    sum=$(cksum < "$f" | cut -d ' ' -f 1)
    case "$f" in
        *.txt) echo "\"$f\",$size,2016-03-14T11:22:33Z,,$sum,pronom,x-fmt/111,Plain Text File,,text/plain,extension match txt," ;;
        *.jpg) echo "\"$f\",$size,2009-07-14T01:32:31Z,,$sum,pronom,fmt/43,JPEG File Interchange Format,1.01,image/jpeg,extension match jpg," ;;
        *.pdf) echo "\"$f\",$size,2018-06-01T09:00:00Z,,$sum,pronom,fmt/276,Acrobat PDF 1.7 - Portable Document Format,1.7,application/pdf,extension match pdf," ;;
        *) echo "\"$f\",$size,2020-01-01T00:00:00Z,,$sum,pronom,UNKNOWN,,,,,no match" ;;
    esac
done
"#;

const CLAMSCAN: &str = r#"#!/bin/sh
for last; do :; done
count=$(find "$last" -type f | wc -l | tr -d ' ')
echo
echo "----------- SCAN SUMMARY -----------"
echo "Known viruses: 0"
echo "Engine version: stub"
echo "Scanned directories: 1"
echo "Scanned files: $count"
echo "Infected files: 0"
"#;

const TREE: &str = r#"#!/bin/sh
for last; do :; done
echo "$last"
find "$last" | sed 1d | sort
"#;

const FIWALK: &str = r#"#!/bin/sh
[ "$1" = "-X" ] || exit 2
printf '<?xml version="1.0" encoding="UTF-8"?>\n<dfxml version="1.0"><source><image_filename>%s</image_filename></source></dfxml>\n' "$3" > "$2"
"#;

const TSK_RECOVER: &str = r#"#!/bin/sh
out="$3"
mkdir -p "$out"
printf 'recovered text file\n' > "$out/file1.txt.txt"
printf '\377\330\377\340 stub jpeg' > "$out/Tulips.jpg"
"#;

/// A directory of executable stub tools, removed on drop
#[derive(Debug)]
pub struct StubToolkit {
    dir: TempDir,
}

impl StubToolkit {
    /// Install stubs for `sf`, `clamscan`, `tree`, `fiwalk` and `tsk_recover`
    ///
    /// # Errors
    ///
    /// Returns an error if the scripts cannot be written
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("fondscan-stubs-").tempdir()?;
        for (name, script) in [
            ("sf", SF),
            ("clamscan", CLAMSCAN),
            ("tree", TREE),
            ("fiwalk", FIWALK),
            ("tsk_recover", TSK_RECOVER),
        ] {
            let path = dir.path().join(name);
            fs::write(&path, script)?;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn tool(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `PATH` with the stub directory ahead of the inherited entries
    ///
    /// # Errors
    ///
    /// Returns an error if an inherited entry contains the path separator
    pub fn path_env(&self) -> io::Result<OsString> {
        let inherited = env::var_os("PATH").unwrap_or_default();
        let entries = std::iter::once(self.dir().to_path_buf()).chain(env::split_paths(&inherited));
        env::join_paths(entries).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }
}

/// Whether a real `program` is on this process's `PATH`
#[must_use]
pub fn installed(program: &str) -> bool {
    env::var_os("PATH").is_some_and(|paths| {
        env::split_paths(&paths).any(|dir| {
            fs::metadata(dir.join(program))
                .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        })
    })
}
