use std::fs;

use tokio_util::sync::CancellationToken;

use precall::{EvaluationTally, GroundTruthScanner, RelevanceJudge, SearchConfig, SearchEntry};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```
/// tmp/
///   a.txt      ("hello")
///   b.txt      ("world")
///   sub/
///     c.txt    ("hello")
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::write(root.join("b.txt"), "world").unwrap();

    let sub = root.join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("c.txt"), "hello").unwrap();

    dir
}

fn scan(config: SearchConfig) -> Vec<SearchEntry> {
    GroundTruthScanner::new(config)
        .scan(&CancellationToken::new())
        .expect("scan not cancelled")
}

fn names(entries: &[SearchEntry]) -> Vec<String> {
    let mut names: Vec<String> = entries
        .iter()
        .map(|e| e.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Ground-truth scanner
// ---------------------------------------------------------------------------

#[test]
fn union_policy_admits_files_on_type_alone() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .content("hello")
        .mask("*.txt")
        .include_files(true)
        .build()
        .unwrap();

    let found = scan(config);

    // b.txt fails the content filter but qualifies on type inclusion, and
    // sub/ qualifies because directories always content-match. The union
    // policy nets the whole tree here.
    assert_eq!(names(&found), vec!["a.txt", "b.txt", "c.txt", "sub"]);
}

#[test]
fn no_query_makes_the_entire_tree_ground_truth() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .mask("*.log")
        .build()
        .unwrap();

    // With no content query every entry content-matches, so neither the
    // failing mask nor the disabled type flags exclude anything.
    let found = scan(config);
    assert_eq!(found.len(), 4);
}

#[test]
fn entry_is_excluded_only_when_all_three_conditions_fail() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .content("hello")
        .mask("*.log")
        .include_dirs(true)
        .build()
        .unwrap();

    // b.txt: not a dir, fails "*.log", does not contain "hello" — excluded.
    // Everything else passes at least one condition.
    let found = scan(config);
    assert_eq!(names(&found), vec!["a.txt", "c.txt", "sub"]);
}

#[test]
fn descends_into_directories_that_were_not_admitted() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .content("hello")
        .mask("a.txt")
        .include_files(true)
        .build()
        .unwrap();

    // Whatever sub/'s own verdict, c.txt below it must still be visited.
    let found = scan(config);
    assert!(names(&found).contains(&"c.txt".to_string()));
}

#[test]
fn root_itself_is_not_a_candidate() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .include_dirs(true)
        .include_files(true)
        .build()
        .unwrap();

    let found = scan(config);
    assert!(found.iter().all(|e| e.path != dir.path()));
    assert_eq!(found.len(), 4);
}

#[test]
fn cancelled_scan_yields_no_ground_truth() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .include_files(true)
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();

    assert!(GroundTruthScanner::new(config).scan(&cancel).is_none());
}

// ---------------------------------------------------------------------------
// Relevance judge
// ---------------------------------------------------------------------------

#[test]
fn file_containing_query_is_relevant_ignoring_case() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .content("HELLO")
        .include_files(true)
        .build()
        .unwrap();
    let judge = RelevanceJudge::new(&config);

    assert!(judge.is_relevant(&SearchEntry::new(dir.path().join("a.txt"), false)));
    assert!(!judge.is_relevant(&SearchEntry::new(dir.path().join("b.txt"), false)));
}

#[test]
fn directories_and_queryless_runs_are_trivially_relevant() {
    let dir = setup_test_dir();

    let with_query = precall::config()
        .root(dir.path())
        .content("hello")
        .include_dirs(true)
        .build()
        .unwrap();
    let judge = RelevanceJudge::new(&with_query);
    assert!(judge.is_relevant(&SearchEntry::new(dir.path().join("sub"), true)));

    let without_query = precall::config()
        .root(dir.path())
        .include_files(true)
        .build()
        .unwrap();
    let judge = RelevanceJudge::new(&without_query);
    assert!(judge.is_relevant(&SearchEntry::new(dir.path().join("b.txt"), false)));
}

#[test]
fn unreadable_file_is_judged_not_relevant() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .content("hello")
        .include_files(true)
        .build()
        .unwrap();
    let judge = RelevanceJudge::new(&config);

    // The streamed entry points at a file that no longer exists — the read
    // failure downgrades it to a miss instead of failing the run.
    assert!(!judge.is_relevant(&SearchEntry::new(dir.path().join("gone.txt"), false)));
}

#[test]
fn observe_counts_every_entry_and_tallies_hits() {
    let dir = setup_test_dir();
    let config = precall::config()
        .root(dir.path())
        .content("hello")
        .include_files(true)
        .build()
        .unwrap();
    let judge = RelevanceJudge::new(&config);

    let mut tally = EvaluationTally::default();
    judge.observe(&SearchEntry::new(dir.path().join("a.txt"), false), &mut tally);
    judge.observe(&SearchEntry::new(dir.path().join("b.txt"), false), &mut tally);

    assert_eq!(tally.streamed, 2);
    assert_eq!(tally.relevant, 1);
}
