use chrono::NaiveDate;
use growth_desk::diagnostics::{ALL_CLEAR, UPLOAD_FIRST};
use growth_desk::{
    compute_kpi, ChecklistState, DiagnosticEngine, DiagnosticFacts, DiagnosticThresholds, KpiSnapshot, MissingInput,
    PerformanceRecord, ReadinessTier, DAILY_TASKS,
};

fn snapshot(impressions: i64, engagements: i64, new_follows: i64) -> KpiSnapshot {
    let record = PerformanceRecord {
        date: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
        impressions,
        engagements,
        new_follows,
        unfollows: 0,
        profile_visits: 0,
        likes: 0,
        bookmarks: 0,
        replies: 0,
        reposts: 0,
        posts_published: 0,
    };
    compute_kpi(&[record]).unwrap()
}

fn weak() -> KpiSnapshot {
    // ER 1%, 0 follows per 1k
    snapshot(1000, 10, 0)
}

fn healthy() -> KpiSnapshot {
    // ER 5%, 2 follows per 1k
    snapshot(1000, 50, 2)
}

fn all_checked() -> ChecklistState {
    let mut checklist = ChecklistState::default();
    for task in DAILY_TASKS.iter() {
        checklist.set(task.id, true);
    }
    checklist
}

#[test]
fn without_analytics_only_the_upload_prompt_is_stated() {
    let engine = DiagnosticEngine::default();
    assert_eq!(engine.statements(None), vec![UPLOAD_FIRST.to_string()]);
}

#[test]
fn weak_snapshot_states_trends_then_conversion_then_engagement() {
    let engine = DiagnosticEngine::default();
    let statements = engine.statements(Some(&weak()));

    assert_eq!(statements.len(), 5);
    assert_eq!(statements[0], "Impressions trend: +0.00% vs previous 28 days.");
    assert_eq!(statements[1], "Engagement rate trend: +0.00pp.");
    assert_eq!(
        statements[2],
        "Follow conversion trend: +0.00 follows per 1k impressions."
    );
    assert!(statements[3].starts_with("Priority: conversion is weak."));
    assert!(statements[4].starts_with("Priority: engagement is soft."));
}

#[test]
fn healthy_snapshot_states_only_trends() {
    let engine = DiagnosticEngine::default();
    let statements = engine.statements(Some(&healthy()));

    assert_eq!(statements.len(), 3);
    assert!(statements.iter().all(|line| !line.starts_with("Priority")));
}

#[test]
fn thresholds_are_strict_lower_bounds() {
    let thresholds = DiagnosticThresholds::default();
    // exactly 1.0 per 1k, 2.3% engagement
    let edge = snapshot(1000, 23, 1);

    assert!(!thresholds.conversion_weak(&edge));
    assert!(!thresholds.engagement_soft(&edge));
    assert!(thresholds.engagement_soft(&snapshot(1000, 21, 1)));
}

#[test]
fn actions_follow_fixed_order_and_cap() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts::default();
    let actions = engine.next_actions(Some(&weak()), &facts, false);

    assert_eq!(actions.len(), 6);
    assert_eq!(
        actions[0],
        "In today's flagship post, add explicit reason to follow this account."
    );
    assert_eq!(actions[1], "Use one concrete source signal and one sharp implication.");
    assert_eq!(
        actions[2],
        "Log at least 5 published posts in Review to identify winning patterns."
    );
    assert_eq!(actions[3], "Set a clear shift objective in Create section.");
    assert_eq!(actions[4], DAILY_TASKS[0].text);
    assert_eq!(actions[5], DAILY_TASKS[1].text);
}

#[test]
fn brief_actions_use_the_shorter_cap() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts::default();
    let full = engine.next_actions(Some(&weak()), &facts, false);
    let brief = engine.next_actions(Some(&weak()), &facts, true);

    assert_eq!(brief.len(), 4);
    assert_eq!(brief[..], full[..4]);
}

#[test]
fn missing_analytics_leads_the_action_list() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts::default();
    let actions = engine.next_actions(None, &facts, false);

    assert_eq!(actions.len(), 5);
    assert_eq!(actions[0], "Upload analytics in Today section first.");
}

#[test]
fn pending_tasks_skip_checked_ones() {
    let engine = DiagnosticEngine::default();
    let mut checklist = ChecklistState::default();
    checklist.set("t1", true);
    checklist.set("t3", true);
    let facts = DiagnosticFacts {
        objective: "grow",
        logged_posts: 5,
        checklist,
    };

    let actions = engine.next_actions(Some(&healthy()), &facts, false);
    assert_eq!(actions, vec![DAILY_TASKS[1].text.to_string(), DAILY_TASKS[3].text.to_string()]);
}

#[test]
fn nothing_left_to_do_yields_all_clear() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts {
        objective: "Ship the energy thread",
        logged_posts: 5,
        checklist: all_checked(),
    };

    assert_eq!(
        engine.next_actions(Some(&healthy()), &facts, false),
        vec![ALL_CLEAR.to_string()]
    );
}

#[test]
fn configured_caps_are_honored() {
    let engine = DiagnosticEngine::new(DiagnosticThresholds {
        max_actions: 2,
        max_brief_actions: 1,
        ..DiagnosticThresholds::default()
    });
    let facts = DiagnosticFacts::default();

    assert_eq!(engine.next_actions(None, &facts, false).len(), 2);
    assert_eq!(engine.next_actions(None, &facts, true).len(), 1);
}

#[test]
fn missing_inputs_are_listed() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts {
        objective: "   ",
        logged_posts: 0,
        checklist: ChecklistState::default(),
    };

    assert_eq!(
        engine.missing(None, &facts),
        vec![MissingInput::Analytics, MissingInput::Objective, MissingInput::PostLogs]
    );
    let facts = DiagnosticFacts {
        objective: "grow",
        logged_posts: 1,
        checklist: ChecklistState::default(),
    };
    assert!(engine.missing(Some(&healthy()), &facts).is_empty());
}

#[test]
fn readiness_is_full_when_everything_is_in_place() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts {
        objective: "grow",
        logged_posts: 12,
        checklist: all_checked(),
    };
    let readiness = engine.readiness(Some(&healthy()), &facts);

    assert_eq!(readiness.score, 100);
    assert_eq!(readiness.tier, ReadinessTier::Ready);
    assert_eq!(readiness.tier.label(), "Ready to execute");
}

#[test]
fn readiness_is_zero_for_a_blank_dashboard() {
    let engine = DiagnosticEngine::default();
    let readiness = engine.readiness(None, &DiagnosticFacts::default());

    assert_eq!(readiness.score, 0);
    assert_eq!(readiness.tier, ReadinessTier::NotReady);
}

#[test]
fn readiness_without_analytics_counts_other_inputs() {
    let engine = DiagnosticEngine::default();
    let facts = DiagnosticFacts {
        objective: "grow",
        logged_posts: 4,
        checklist: all_checked(),
    };
    // 10 objective + 16 logs + 20 checklist
    let readiness = engine.readiness(None, &facts);

    assert_eq!(readiness.score, 46);
    assert_eq!(readiness.tier, ReadinessTier::Building);
}

#[test]
fn weak_kpi_only_earns_the_upload_points() {
    let engine = DiagnosticEngine::default();
    let readiness = engine.readiness(Some(&weak()), &DiagnosticFacts::default());

    assert_eq!(readiness.score, 20);
}

#[test]
fn tier_boundaries() {
    assert_eq!(ReadinessTier::from_score(80), ReadinessTier::Ready);
    assert_eq!(ReadinessTier::from_score(79), ReadinessTier::OnTrack);
    assert_eq!(ReadinessTier::from_score(60), ReadinessTier::OnTrack);
    assert_eq!(ReadinessTier::from_score(59), ReadinessTier::Building);
    assert_eq!(ReadinessTier::from_score(40), ReadinessTier::Building);
    assert_eq!(ReadinessTier::from_score(39), ReadinessTier::NotReady);
}

#[test]
fn report_bundles_every_rule() {
    let engine = DiagnosticEngine::default();
    let report = engine.report(None, &DiagnosticFacts::default());

    assert_eq!(report.statements, vec![UPLOAD_FIRST.to_string()]);
    assert_eq!(report.actions[0], "Upload analytics in Today section first.");
    assert_eq!(report.missing.len(), 3);
    assert_eq!(report.readiness.score, 0);
}
