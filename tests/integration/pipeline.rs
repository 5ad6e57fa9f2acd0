//! Integration tests for the characterization pipeline with scripted tools

use fondscan_core::{HashAlgorithm, RunOptions};
use fondscan_pipeline::{Characterizer, Config};
use fondscan_tools::scripted::ScriptedRunner;
use fondscan_tools::{ToolInvocation, ToolOutput, ToolPaths};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SF_HEADER: &str =
    "filename,filesize,modified,errors,md5,namespace,id,format,version,mime,basis,warning\n";

fn sf(inv: &ToolInvocation) -> fondscan_core::Result<ToolOutput> {
    if inv.args.first().is_some_and(|a| a == "-version") {
        return Ok(ToolOutput::success("siegfried 1.11.0\n"));
    }
    let source = inv.args.last().unwrap().to_string_lossy().into_owned();
    Ok(ToolOutput::success(format!(
        "{SF_HEADER}{source}/a.txt,5,2016-03-14T11:22:33Z,,aa,pronom,x-fmt/111,Plain Text File,,text/plain,,\n"
    )))
}

fn infected_clamscan(_: &ToolInvocation) -> fondscan_core::Result<ToolOutput> {
    Ok(ToolOutput {
        code: 1,
        stdout: b"/in/a.txt: Eicar-Signature FOUND\n\nScanned files: 1\nInfected files: 1\n".to_vec(),
        stderr: String::new(),
    })
}

fn input_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    dir
}

fn arg_strings(inv: &ToolInvocation) -> Vec<String> {
    inv.args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_infections_are_reported_not_fatal() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new()
        .on("sf", sf)
        .on("clamscan", infected_clamscan);
    let characterizer = Characterizer::new(runner, ToolPaths::default());

    let summary = characterizer
        .run(&RunOptions::new(input.path(), out.path(), "test"))
        .unwrap();

    let scan = summary.virus_scan.unwrap();
    assert_eq!(scan.infected_files, 1);
    let log = fs::read_to_string(summary.layout.virus_log()).unwrap();
    assert!(log.contains("Eicar-Signature FOUND"));
    let html = fs::read_to_string(&summary.html_report).unwrap();
    assert!(html.contains("Infected files: 1"));
}

#[test]
fn test_clamscan_error_exit_is_fatal() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on("sf", sf).on("clamscan", |_| {
        Ok(ToolOutput {
            code: 2,
            stdout: Vec::new(),
            stderr: "Can't open database\n".to_string(),
        })
    });
    let characterizer = Characterizer::new(runner, ToolPaths::default());

    let err = characterizer
        .run(&RunOptions::new(input.path(), out.path(), "test"))
        .unwrap_err();

    assert_eq!(err.code(), "ERR_TOOL_FAILED");
    assert!(err.to_string().contains("Can't open database"));
    assert!(!characterizer.runner().called("sf"));
}

#[test]
fn test_siegfried_failure() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on("sf", |_| {
        Ok(ToolOutput {
            code: 1,
            stdout: Vec::new(),
            stderr: "signature file not found".to_string(),
        })
    });
    let characterizer = Characterizer::new(runner, ToolPaths::default());
    let mut options = RunOptions::new(input.path(), out.path(), "test");
    options.virus_scan = false;

    let err = characterizer.run(&options).unwrap_err();
    assert_eq!(err.code(), "ERR_TOOL_FAILED");
}

#[test]
fn test_flags_reach_tool_command_lines() {
    let input = TempDir::new().unwrap();
    let image = input.path().join("disk.E01");
    fs::write(&image, [0u8; 64]).unwrap();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new()
        .on("sf", sf)
        .on("clamscan", |_| {
            Ok(ToolOutput::success("Scanned files: 1\nInfected files: 0\n"))
        })
        .on("fiwalk", |inv| {
            fs::write(Path::new(&inv.args[1]), "<dfxml/>").unwrap();
            Ok(ToolOutput::success(""))
        })
        .on("tsk_recover", |inv| {
            fs::write(Path::new(&inv.args[2]).join("a.txt"), "hello").unwrap();
            Ok(ToolOutput::success(""))
        });
    let characterizer = Characterizer::new(runner, ToolPaths::default());
    let mut options = RunOptions::new(&image, out.path(), "test");
    options.disk_image = true;
    options.allocated_only = true;
    options.scan_archives = true;
    options.large_files = true;
    options.hash = HashAlgorithm::Sha1;

    characterizer.run(&options).unwrap();

    let calls = characterizer.runner().calls();
    let find = |program: &str| {
        calls
            .iter()
            .find(|c| c.program == program && c.args.first().is_none_or(|a| a != "-version"))
            .map(arg_strings)
            .unwrap()
    };
    assert_eq!(find("tsk_recover")[0], "-a");
    let sf_args = find("sf");
    assert_eq!(&sf_args[..4], ["-csv", "-hash", "sha1", "-z"]);
    let clam_args = find("clamscan");
    assert!(clam_args.contains(&"--max-filesize=4000M".to_string()));
    assert!(clam_args.contains(&"--max-scansize=4000M".to_string()));
}

#[test]
fn test_empty_disk_image() {
    let input = TempDir::new().unwrap();
    let image = input.path().join("blank.img");
    fs::write(&image, [0u8; 64]).unwrap();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new()
        .on("fiwalk", |inv| {
            fs::write(Path::new(&inv.args[1]), "<dfxml/>").unwrap();
            Ok(ToolOutput::success(""))
        })
        .on("tsk_recover", |_| Ok(ToolOutput::success("")));
    let characterizer = Characterizer::new(runner, ToolPaths::default());
    let mut options = RunOptions::new(&image, out.path(), "test");
    options.disk_image = true;

    let err = characterizer.run(&options).unwrap_err();
    assert_eq!(err.code(), "ERR_NOTHING_CARVED");
    assert!(!characterizer.runner().called("sf"));
}

#[test]
fn test_tool_paths_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("fondscan.toml");
    fs::write(
        &config_path,
        "[tools]\nsf = \"/opt/siegfried/sf\"\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();
    let config = Config::load(&config_path).unwrap();

    let input = input_dir();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on("/opt/siegfried/sf", sf);
    let characterizer = Characterizer::new(runner, config.tools);
    let mut options = RunOptions::new(input.path(), out.path(), "test");
    options.virus_scan = false;

    let summary = characterizer.run(&options).unwrap();
    assert_eq!(summary.records, 1);
    assert!(!characterizer.runner().called("sf"));
}

#[test]
fn test_remove_carved_ignored_for_directory_run() {
    let input = input_dir();
    let out = TempDir::new().unwrap();
    let runner = ScriptedRunner::new().on("sf", sf);
    let characterizer = Characterizer::new(runner, ToolPaths::default());
    let mut options = RunOptions::new(input.path(), out.path(), "test");
    options.virus_scan = false;
    options.remove_carved = true;

    let summary = characterizer.run(&options).unwrap();

    assert!(input.path().join("a.txt").is_file());
    assert!(summary.carved_files.is_none());
    assert!(summary.layout.siegfried_csv().is_file());
    assert!(summary.html_report.is_file());
    assert!(!characterizer.runner().called("tsk_recover"));
}

#[test]
fn test_overwrite_never_deletes_the_source() {
    let parent = TempDir::new().unwrap();
    let source = parent.path().join("acc");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("precious.txt"), "keep").unwrap();
    let characterizer = Characterizer::new(ScriptedRunner::new(), ToolPaths::default());
    let mut options = RunOptions::new(&source, parent.path(), "acc");
    options.overwrite = true;

    let err = characterizer.run(&options).unwrap_err();

    assert_eq!(err.code(), "ERR_INVALID_INPUT");
    assert!(source.join("precious.txt").is_file());
    assert!(characterizer.runner().calls().is_empty());
}
