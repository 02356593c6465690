//! End-to-end behaviour: raw typing in, result sets out.

use std::sync::Arc;
use std::time::Duration;

use nodes::{IssueTracker, RepositoryBrowser, TrackerConfig};
use pipeline::fakes::{issue, repository, RecordingSink, ScriptedGithub};
use pipeline::{ConditionerConfig, Issue, OutputSink, Repository};
use tokio::sync::mpsc;
use tokio::time::sleep;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// A sequence of `(text, pause after typing it)` keystrokes.
async fn type_script(raw: mpsc::Sender<String>, script: Vec<(&'static str, u64)>) {
    for (text, pause) in script {
        raw.send(text.to_string()).await.unwrap();
        sleep(ms(pause)).await;
    }
}

async fn run_tracker(
    github: Arc<ScriptedGithub>,
    script: Vec<(&'static str, u64)>,
) -> Arc<RecordingSink<Issue>> {
    let tracker = IssueTracker::new(github.clone(), github, TrackerConfig::default()).unwrap();
    let sink = Arc::new(RecordingSink::new());
    let (raw_tx, raw_rx) = mpsc::channel(16);

    let typing = tokio::spawn(type_script(raw_tx, script));
    let output: Arc<dyn OutputSink<Issue>> = sink.clone();
    tracker.track(raw_rx, output).await;
    typing.await.unwrap();
    sink
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_issues_one_lookup() {
    let github = Arc::new(ScriptedGithub::new().with_missing_repository("react", ms(10)));

    run_tracker(github.clone(), vec![("r", 100), ("re", 100), ("react", 1_000)]).await;

    assert_eq!(github.repository_calls(), vec!["react"]);
}

#[tokio::test(start_paused = true)]
async fn test_found_repository_delivers_issues_in_returned_order() {
    let github = Arc::new(
        ScriptedGithub::new()
            .with_repository("octocat", repository("octocat/Hello-World"), ms(50))
            .with_issues(
                "octocat/Hello-World",
                vec![issue(7, "seventh"), issue(3, "third"), issue(5, "fifth")],
                ms(50),
            ),
    );

    let sink = run_tracker(github.clone(), vec![("octocat", 1_000)]).await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    let numbers: Vec<u64> = delivered[0].iter().map(|i| i.number.as_u64()).collect();
    assert_eq!(numbers, vec![7, 3, 5]);
    assert_eq!(github.issue_calls(), vec!["octocat/Hello-World"]);
    assert_eq!(sink.no_results_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_repository_delivers_empty_and_signals_no_results() {
    let github = Arc::new(ScriptedGithub::new().with_missing_repository("doesnotexist123", ms(50)));

    let sink = run_tracker(github.clone(), vec![("doesnotexist123", 1_000)]).await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].is_empty());
    assert_eq!(sink.no_results_count(), 1);
    assert!(github.issue_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_query_committed_during_lookup_supersedes_it() {
    let github = Arc::new(
        ScriptedGithub::new()
            .with_repository("alpha", repository("octo/alpha"), ms(1_000))
            .with_issues("octo/alpha", vec![issue(1, "alpha")], ms(10))
            .with_repository("beta", repository("octo/beta"), ms(50))
            .with_issues("octo/beta", vec![issue(2, "beta")], ms(10)),
    );

    // alpha commits at 500ms and is still resolving when beta commits at 1100ms.
    let sink = run_tracker(github.clone(), vec![("alpha", 600), ("beta", 2_000)]).await;
    sleep(ms(2_000)).await;

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].as_slice()[0].title, "beta");
    assert_eq!(github.repository_calls(), vec!["alpha", "beta"]);
}

#[tokio::test(start_paused = true)]
async fn test_retyping_same_query_does_not_look_up_again() {
    let github = Arc::new(ScriptedGithub::new().with_missing_repository("react", ms(10)));

    let sink = run_tracker(
        github.clone(),
        vec![("react", 600), ("reac", 100), ("react", 600), ("", 600)],
    )
    .await;

    assert_eq!(github.repository_calls(), vec!["react"]);
    assert_eq!(sink.delivered().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_browser_lists_owner_repositories() {
    let github = Arc::new(ScriptedGithub::new().with_owner_repositories(
        "octocat",
        vec![repository("octocat/Hello-World"), repository("octocat/Spoon-Knife")],
        ms(50),
    ));
    let browser = RepositoryBrowser::new(github.clone(), TrackerConfig::default()).unwrap();
    let sink = Arc::new(RecordingSink::<Repository>::new());
    let (raw_tx, raw_rx) = mpsc::channel(16);

    let typing = tokio::spawn(type_script(raw_tx, vec![("octo", 100), ("octocat", 1_000)]));
    let output: Arc<dyn OutputSink<Repository>> = sink.clone();
    let summary = browser.browse(raw_rx, output).await;
    typing.await.unwrap();

    let names: Vec<String> = sink.delivered()[0].iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Hello-World", "Spoon-Knife"]);
    assert_eq!(github.listing_calls(), vec!["octocat"]);
    assert_eq!(summary.accepted, 1);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let github = Arc::new(ScriptedGithub::new());
    let config = TrackerConfig {
        conditioner: ConditionerConfig::new(Duration::ZERO),
        ..TrackerConfig::default()
    };
    assert!(IssueTracker::new(github.clone(), github.clone(), config).is_err());

    let config = TrackerConfig {
        channel_capacity: 0,
        ..TrackerConfig::default()
    };
    assert!(RepositoryBrowser::new(github, config).is_err());
}
