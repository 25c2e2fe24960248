use std::{
    io::{Read, Write},
    path::Path,
    process::{Command, Output},
};

use flate2::{read::MultiGzDecoder, write::GzEncoder, Compression};
use tempfile::{tempdir, NamedTempFile};

const EXE: &str = env!("CARGO_BIN_EXE_pileup2dc");

const HEADER: &str = "count\tchr\tloc\tsubref\trefb\t\
    A_All\tC_All\tG_All\tT_All\tN_All\tTot_All\tmatch_All\tMajVot_All\t\
    A_F\tC_F\tG_F\tT_F\tN_F\tTot_F\tmatch_F\tMajVot_F\t\
    A_R\tC_R\tG_R\tT_R\tN_R\tTot_R\tmatch_R\tMajVot_R";

const THREE_LINES: &str = "chr1\t100\tA\t4\t..,,\tIIII\n\
    chr1\t101\tc\t3\t.,.\tIII\n\
    chr1\t102\tG\t5\t,,,,.\tIIIII\n";

fn pileup(s: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(s.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn run<P: AsRef<Path>>(args: &[&str], input: Option<P>) -> Output {
    let mut cmd = Command::new(EXE);
    cmd.args(["-l", "warn"]).args(args);
    if let Some(p) = input {
        cmd.arg(p.as_ref());
    }
    cmd.output().expect("Failed to run pileup2dc")
}

fn rows(out: &str) -> Vec<Vec<String>> {
    out.lines()
        .skip(1)
        .map(|l| l.split('\t').map(|s| s.to_owned()).collect())
        .collect()
}

#[test]
fn three_position_chart() {
    let f = pileup(THREE_LINES);
    let out = run(&[], Some(f.path()));
    assert!(out.status.success());
    let s = String::from_utf8(out.stdout).unwrap();
    assert_eq!(s.lines().next(), Some(HEADER));

    let rows = rows(&s);
    assert_eq!(rows.len(), 3);
    for (i, r) in rows.iter().enumerate() {
        assert_eq!(r.len(), 29);
        assert_eq!(r[0], (i + 1).to_string());
        assert_eq!(r[1], "chr1");
        assert_eq!(r[2], (100 + i).to_string());
        assert_eq!(r[3], "chr1");
        assert_eq!(r[4], ["A", "C", "G"][i]);
        // match_All == Tot_All
        assert_eq!(r[11], r[10]);
        // MajVot_All is the reference base
        assert_eq!(r[12], r[4]);
    }
    assert_eq!(
        rows[2][5..13],
        ["0", "0", "5", "0", "0", "5", "5", "G"].map(String::from)
    );
    assert_eq!(rows[2][13..21], ["0", "0", "1", "0", "0", "1", "1", "G"].map(String::from));
    assert_eq!(rows[2][21..29], ["0", "0", "4", "0", "0", "4", "4", "G"].map(String::from));
}

#[test]
fn rows_follow_input_order() {
    let f = pileup("chr1\t20\tA\t1\t.\nchr1\t10\tA\t1\t.\n");
    let out = run(&["-t", "2", "-L", "chrX"], Some(f.path()));
    assert!(out.status.success());
    let rows = rows(&String::from_utf8(out.stdout).unwrap());
    assert_eq!(rows[0][..4], ["1", "chrX", "20", "chrX"].map(String::from));
    assert_eq!(rows[1][..4], ["2", "chrX", "10", "chrX"].map(String::from));
}

#[test]
fn missing_argument_gives_usage() {
    let out = run::<&str>(&[], None);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let err = String::from_utf8(out.stderr).unwrap();
    assert!(err.contains("Usage"));
}

#[test]
fn unreadable_input_is_fatal() {
    let dir = tempdir().unwrap();
    let out = run(&[], Some(dir.path().join("no_such.pileup")));
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn malformed_line_warns_and_continues() {
    let f = pileup("chr1\t1\tA\t1\t.\nchr1\tone\tA\t1\t.\nchr1\t3\tA\t1\t,\n");
    let out = run(&[], Some(f.path()));
    assert!(out.status.success());
    let rows = rows(&String::from_utf8(out.stdout).unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][2], "3");
    let err = String::from_utf8(out.stderr).unwrap();
    assert!(err.contains(":2"));
}

#[test]
fn non_utf8_input_bytes() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"chr\xe91\t1\tA\t1\t.\nchr1\t2\t\xe9\t1\t.\nchr1\t3\tG\t1\t,\n")
        .unwrap();
    f.flush().unwrap();
    let out = run(&[], Some(f.path()));
    assert!(out.status.success());
    let rows = rows(&String::from_utf8(out.stdout).unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "1");
    assert_eq!(rows[1][2], "3");
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains(":2"));
}

#[test]
fn strict_mode_aborts_without_output() {
    let f = pileup("chr1\t1\tA\t1\t.\nchr1\t2\tQ\t1\t.\n");
    let dir = tempdir().unwrap();
    let out_file = dir.path().join("out.dc");
    let out = run(
        &["--strict", "-o", out_file.to_str().unwrap()],
        Some(f.path()),
    );
    assert!(!out.status.success());
    assert!(!out_file.exists());
}

#[test]
fn compressed_input_and_output() {
    let f = NamedTempFile::new().unwrap();
    let mut z = GzEncoder::new(f.reopen().unwrap(), Compression::default());
    z.write_all(THREE_LINES.as_bytes()).unwrap();
    z.finish().unwrap();

    let dir = tempdir().unwrap();
    let out_file = dir.path().join("out.dc.gz");
    let out = run(&["-z", "-o", out_file.to_str().unwrap()], Some(f.path()));
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let mut s = String::new();
    MultiGzDecoder::new(std::fs::File::open(&out_file).unwrap())
        .read_to_string(&mut s)
        .unwrap();
    assert_eq!(s.lines().next(), Some(HEADER));
    assert_eq!(s.lines().count(), 4);
}

#[test]
fn deletion_option() {
    let f = pileup("chr1\t1\tA\t3\t.-1c,\t###\n");
    let out = run(&[], Some(f.path()));
    let default_rows = rows(&String::from_utf8(out.stdout).unwrap());
    // '-' ignored, so the deleted base is counted as a reverse mismatch
    assert_eq!(default_rows[0][6], "1");

    let out = run(&["--skip-deletions"], Some(f.path()));
    let rows = rows(&String::from_utf8(out.stdout).unwrap());
    assert_eq!(rows[0][6], "0");
    assert_eq!(rows[0][10], "2");
}
