use std::collections::HashSet;

use shared::{
    ChartDescriptor, ChartKind, DashboardError, LazyMounter, MountConfig, MountHost, MountOutcome,
    MountState, MountStats, Theme, VisibilityOutcome,
};

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Watch(String, f64),
    Unwatch(String),
    Construct(String, ChartKind, Option<f64>),
}

#[derive(Default)]
struct FakeHost {
    present: HashSet<String>,
    failing: HashSet<String>,
    width: f64,
    events: Vec<Event>,
}

impl FakeHost {
    fn with_targets(width: f64, ids: &[&str]) -> Self {
        Self {
            present: ids.iter().map(|id| (*id).to_owned()).collect(),
            width,
            ..Self::default()
        }
    }

    fn constructions(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Construct(id, _, _) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    fn events_for(&self, id: &str) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| match event {
                Event::Watch(target, _) | Event::Unwatch(target) | Event::Construct(target, _, _) => {
                    target == id
                }
            })
            .cloned()
            .collect()
    }
}

impl MountHost for FakeHost {
    type Target = String;

    fn resolve(&self, target_id: &str) -> Option<String> {
        self.present.get(target_id).cloned()
    }

    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn watch(&mut self, target_id: &str, _target: &String, threshold: f64) {
        self.events.push(Event::Watch(target_id.to_owned(), threshold));
    }

    fn unwatch(&mut self, target_id: &str, _target: &String) {
        self.events.push(Event::Unwatch(target_id.to_owned()));
    }

    fn construct(&mut self, target: &String, descriptor: &ChartDescriptor) -> Result<(), String> {
        if self.failing.contains(target) {
            return Err("canvas has no 2d context".to_owned());
        }
        self.events.push(Event::Construct(
            target.clone(),
            descriptor.kind,
            descriptor.options.aspect_ratio,
        ));
        Ok(())
    }
}

fn bar() -> ChartDescriptor {
    ChartDescriptor::new(ChartKind::Bar, &Theme::default())
}

fn doughnut() -> ChartDescriptor {
    ChartDescriptor::new(ChartKind::Doughnut, &Theme::default())
}

fn mounter(host: FakeHost) -> LazyMounter<FakeHost> {
    LazyMounter::new(host, MountConfig::default())
}

#[test]
fn missing_target_is_skipped_silently() {
    let mut mounter = mounter(FakeHost::with_targets(1280.0, &["rmseChart"]));

    assert_eq!(mounter.mount("scatterChart", bar()), MountOutcome::Skipped);
    assert_eq!(mounter.state("scatterChart"), None);
    assert!(mounter.host().events.is_empty());

    let outcome = mounter.on_visibility("scatterChart", 1.0).expect("no error");
    assert_eq!(outcome, VisibilityOutcome::Unknown);
    assert!(mounter.host().constructions().is_empty());
    assert_eq!(mounter.stats(), MountStats::default());
}

#[test]
fn repeated_visibility_constructs_once() {
    let mut mounter = mounter(FakeHost::with_targets(1280.0, &["rmseChart"]));
    assert_eq!(mounter.mount("rmseChart", bar()), MountOutcome::Watching);

    let outcomes = [1.0, 0.0, 0.6, 1.0]
        .iter()
        .map(|fraction| mounter.on_visibility("rmseChart", *fraction).expect("visible"))
        .collect::<Vec<_>>();

    assert_eq!(
        outcomes,
        vec![
            VisibilityOutcome::Constructed,
            VisibilityOutcome::Retired,
            VisibilityOutcome::Retired,
            VisibilityOutcome::Retired,
        ]
    );
    assert_eq!(mounter.host().constructions(), vec!["rmseChart"]);
    assert_eq!(mounter.state("rmseChart"), Some(MountState::Constructed));
}

#[test]
fn watch_is_released_right_after_construction() {
    let mut mounter = mounter(FakeHost::with_targets(1280.0, &["rmseChart"]));
    mounter.mount("rmseChart", bar());
    mounter.on_visibility("rmseChart", 0.5).expect("visible");

    assert_eq!(
        mounter.host().events,
        vec![
            Event::Watch("rmseChart".to_owned(), 0.05),
            Event::Construct("rmseChart".to_owned(), ChartKind::Bar, Some(2.0)),
            Event::Unwatch("rmseChart".to_owned()),
        ]
    );
}

#[test]
fn fractions_below_threshold_do_nothing() {
    let mut mounter = mounter(FakeHost::with_targets(1280.0, &["foldChart"]));
    mounter.mount("foldChart", bar());

    for fraction in [0.0, 0.01, 0.049, f64::NAN] {
        let outcome = mounter.on_visibility("foldChart", fraction).expect("ignored");
        assert_eq!(outcome, VisibilityOutcome::BelowThreshold);
    }
    assert!(mounter.host().constructions().is_empty());
    assert_eq!(mounter.state("foldChart"), Some(MountState::Watching));

    let outcome = mounter.on_visibility("foldChart", 0.05).expect("threshold reached");
    assert_eq!(outcome, VisibilityOutcome::Constructed);
}

#[test]
fn second_mount_before_visibility_does_not_double_construct() {
    let mut mounter = mounter(FakeHost::with_targets(1280.0, &["optunaChart"]));

    assert_eq!(mounter.mount("optunaChart", bar()), MountOutcome::Watching);
    assert_eq!(
        mounter.mount("optunaChart", doughnut()),
        MountOutcome::AlreadyRegistered
    );
    mounter.on_visibility("optunaChart", 1.0).expect("visible");
    mounter.on_visibility("optunaChart", 1.0).expect("visible");

    let watches = mounter
        .host()
        .events
        .iter()
        .filter(|event| matches!(event, Event::Watch(..)))
        .count();
    assert_eq!(watches, 1);
    assert_eq!(
        mounter.host().events_for("optunaChart")[1],
        Event::Construct("optunaChart".to_owned(), ChartKind::Bar, Some(2.0))
    );
    assert_eq!(mounter.host().constructions().len(), 1);
    assert_eq!(
        mounter.mount("optunaChart", bar()),
        MountOutcome::AlreadyRegistered
    );
}

#[test]
fn construction_failure_retires_the_slot() {
    let mut host = FakeHost::with_targets(1280.0, &["accuracyChart"]);
    host.failing.insert("accuracyChart".to_owned());
    let mut mounter = mounter(host);
    mounter.mount("accuracyChart", doughnut());

    let err = mounter
        .on_visibility("accuracyChart", 1.0)
        .expect_err("backend rejects the chart");
    match err {
        DashboardError::Construction { target_id, reason } => {
            assert_eq!(target_id, "accuracyChart");
            assert!(reason.contains("2d context"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(mounter.state("accuracyChart"), Some(MountState::Failed));
    assert_eq!(
        mounter.host().events_for("accuracyChart").last(),
        Some(&Event::Unwatch("accuracyChart".to_owned()))
    );
    let again = mounter.on_visibility("accuracyChart", 1.0).expect("retired");
    assert_eq!(again, VisibilityOutcome::Retired);
    assert_eq!(
        mounter.stats(),
        MountStats {
            watching: 0,
            constructed: 0,
            failed: 1
        }
    );
}

#[test]
fn aspect_ratio_follows_viewport_and_kind() {
    let mut narrow = mounter(FakeHost::with_targets(400.0, &["accuracyChart", "rmseChart"]));
    narrow.mount("accuracyChart", doughnut());
    narrow.mount("rmseChart", bar());
    narrow.on_visibility("accuracyChart", 1.0).expect("visible");
    narrow.on_visibility("rmseChart", 1.0).expect("visible");

    let mut wide = mounter(FakeHost::with_targets(1440.0, &["accuracyChart", "rmseChart"]));
    wide.mount("accuracyChart", doughnut());
    wide.mount("rmseChart", bar());
    wide.on_visibility("accuracyChart", 1.0).expect("visible");
    wide.on_visibility("rmseChart", 1.0).expect("visible");

    let ratio = |mounter: &LazyMounter<FakeHost>, id: &str| {
        mounter
            .host()
            .events_for(id)
            .into_iter()
            .find_map(|event| match event {
                Event::Construct(_, _, ratio) => ratio,
                _ => None,
            })
    };
    assert_eq!(ratio(&narrow, "accuracyChart"), Some(1.1));
    assert_eq!(ratio(&narrow, "rmseChart"), Some(1.2));
    assert_eq!(ratio(&wide, "accuracyChart"), Some(1.5));
    assert_eq!(ratio(&wide, "rmseChart"), Some(2.0));
}

#[test]
fn scroll_scenario_constructs_two_of_three() {
    let ids = ["rmseChart", "scatterChart", "accuracyChart"];
    let mut mounter = mounter(FakeHost::with_targets(1280.0, &ids));
    for id in ids {
        assert_eq!(mounter.mount(id, bar()), MountOutcome::Watching);
    }

    // Initial observer callbacks: only the first widget is on screen.
    mounter.on_visibility("rmseChart", 1.0).expect("visible");
    mounter.on_visibility("scatterChart", 0.0).expect("off screen");
    mounter.on_visibility("accuracyChart", 0.0).expect("off screen");

    // Scroll brings the second widget into view.
    mounter.on_visibility("scatterChart", 0.3).expect("scrolled into view");
    mounter.on_visibility("accuracyChart", 0.02).expect("barely visible");

    assert_eq!(mounter.host().constructions(), vec!["rmseChart", "scatterChart"]);
    assert_eq!(
        mounter.host().events_for("accuracyChart"),
        vec![Event::Watch("accuracyChart".to_owned(), 0.05)]
    );
    assert_eq!(
        mounter.stats(),
        MountStats {
            watching: 1,
            constructed: 2,
            failed: 0
        }
    );
}

#[test]
fn custom_threshold_is_passed_to_the_watch() {
    let config = MountConfig {
        visibility_threshold: 0.25,
        ..MountConfig::default()
    };
    let mut mounter = LazyMounter::new(FakeHost::with_targets(800.0, &["residualChart"]), config);
    mounter.mount("residualChart", bar());
    assert_eq!(
        mounter.on_visibility("residualChart", 0.2).expect("ignored"),
        VisibilityOutcome::BelowThreshold
    );
    assert_eq!(
        mounter.host().events[0],
        Event::Watch("residualChart".to_owned(), 0.25)
    );
}
