//! Progress workflow: run breaks through a session, persist them and read
//! back streaks and daily stats.

use chrono::{FixedOffset, TimeZone, Utc};
use refreshx_core::exercise::{ExerciseSpec, FocusArea};
use refreshx_core::stats::day_detail;
use refreshx_core::{
    BreakPlanner, BreakSession, BreakStore, Database, FixedClock, SessionUpdate, UserProfile,
};
use uuid::Uuid;

fn exercise(id: &str, area: FocusArea) -> ExerciseSpec {
    ExerciseSpec {
        id: id.into(),
        name: format!("Exercise {id}"),
        instructions: String::new(),
        duration_seconds: 20,
        repetitions: 3,
        focus_area: area,
        met_score: 1.5,
    }
}

#[test]
fn test_full_break_workflow() {
    let db = Database::open_memory().unwrap();
    let user = Uuid::new_v4();
    db.upsert_exercise(&exercise("neck", FocusArea::Back)).unwrap();
    db.upsert_exercise(&exercise("palming", FocusArea::Eye)).unwrap();
    db.add_to_routine(user, "neck").unwrap();
    db.add_to_routine(user, "palming").unwrap();

    let routine: Vec<String> = db.routine(user).unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(routine, vec!["neck", "palming"]);

    // Two breaks on Monday, one on Sunday (all UTC)
    let starts = [
        Utc.with_ymd_and_hms(2024, 3, 10, 10, 20, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 11, 10, 20, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 11, 11, 40, 0).unwrap(),
    ];
    for start in starts {
        let mut session = BreakSession::start(user, start, 20, routine.clone());
        db.insert_break(session.event()).unwrap();
        let updates = session.mark_exercise_complete();
        assert!(matches!(updates[0], SessionUpdate::ExerciseCompleted { .. }));
        assert!(matches!(session.end(), SessionUpdate::Finished { .. }));
        db.update_break(session.event()).unwrap();
    }

    let history = db.breaks_for_user(user).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|e| e.completed));
    assert!(history[0].scheduled_time > history[2].scheduled_time);

    let profile = UserProfile {
        job_start: "09:00".into(),
        job_end: "17:00".into(),
        weight: Some(70.0),
        ..UserProfile::default()
    };
    let clock = FixedClock::new(
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 11, 12, 0, 0)
            .unwrap(),
    );
    let planner = BreakPlanner::new(profile, clock);

    let ids: Vec<String> = history.iter().filter_map(|e| e.exercise_id.clone()).collect();
    let exercises = db.exercises_by_ids(&ids).unwrap();

    let summary = planner.daily_summary(&history, &exercises);
    assert_eq!(summary.completed_count, 2);
    assert_eq!(summary.missed_count, 0);
    assert!((summary.goal_progress - 0.4).abs() < 1e-9);
    assert!((summary.calories_burned - 2.0 * 1.8375).abs() < 1e-9);

    assert_eq!(planner.streak(&history), 2);

    let detail = day_detail(
        chrono::NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
        &history,
        &exercises,
        Some(70.0),
        &Utc,
    );
    assert_eq!(detail.breaks.len(), 2);
    assert_eq!(detail.exercises.len(), 1);
    assert_eq!(detail.by_focus_area.get(&FocusArea::Back), Some(&1));
}

#[test]
fn test_abandoned_break_stays_open() {
    let db = Database::open_memory().unwrap();
    let user = Uuid::new_v4();
    let session = BreakSession::start(user, Utc::now(), 20, Vec::new());
    db.insert_break(session.event()).unwrap();

    let history = db.breaks_for_user(user).unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].completed);
    assert_eq!(history[0].exercise_id, None);
}
