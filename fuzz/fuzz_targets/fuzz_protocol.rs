#![no_main]

use ffip::config::FinderConfig;
use ffip::finder::Finder;
use ffip::index::Corpus;
use ffip::server::serve_lines;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use termcolor::NoColor;

fuzz_target!(|data: &[u8]| {
    // Every complete request line must produce exactly one END line
    let corpus = Corpus::from_paths(["src/main.rs", "src/lib.rs", "tests/main_test.rs"], 10);
    let finder = Finder::from_corpus(corpus, FinderConfig::default());

    let mut reader = Cursor::new(data);
    let mut writer = NoColor::new(Vec::new());
    let stats = serve_lines(&finder, &mut reader, &mut writer, false).unwrap();

    let out = writer.into_inner();
    let ends = out.split(|&b| b == b'\n').filter(|line| *line == b"END").count();
    assert_eq!(ends as u64, stats.queries);
});
