use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use rust_project_planner::model::drag::{self, BarTarget, DragController, DragKind};
use rust_project_planner::model::filter::FilterChip;
use rust_project_planner::model::{ChipSet, TimelineWindow, ViewMode};
use uuid::Uuid;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn mode() -> impl Strategy<Value = ViewMode> {
    prop::sample::select(ViewMode::ALL.to_vec())
}

fn chip() -> impl Strategy<Value = FilterChip> {
    let key = prop::sample::select(vec!["status", "priority", "tags", "members", "ref"]);
    let value = prop::sample::select(vec!["active", "high", "frontend", "alex", "x"]);
    (key, value).prop_map(|(k, v)| FilterChip::new(k, v))
}

proptest! {
    #[test]
    fn grid_offsets_invert(
        mode in mode(),
        zoom in 0.5f32..=2.0,
        start_shift in -400i64..400,
        offset in -200i64..200,
    ) {
        let mut window = TimelineWindow::new(base() + Duration::days(start_shift), mode);
        window.set_zoom(zoom);
        let date = window.date_at_offset(offset);
        prop_assert_eq!(window.offset_days(date), offset);

        let span = window.bar_span(date, date);
        let cell = window.cell_width();
        prop_assert!((span.left - offset as f32 * cell).abs() < 1e-2);
        prop_assert!((span.width - cell).abs() < 1e-3);
    }

    #[test]
    fn move_preserves_duration(
        start_shift in 0i64..365,
        length in 0i64..90,
        days in -120i64..120,
    ) {
        let start = base() + Duration::days(start_shift);
        let end = start + Duration::days(length);
        match drag::resolve(DragKind::Move, start, end, days) {
            Some((new_start, new_end)) => {
                prop_assert_eq!(new_end - new_start, end - start);
                prop_assert_eq!(new_start - start, Duration::days(days));
            }
            None => prop_assert_eq!(days, 0),
        }
    }

    #[test]
    fn drag_release_snaps_to_whole_days(
        length in 1i64..30,
        cell in prop::sample::select(vec![20.0f32, 40.0, 60.0, 140.0]),
        delta_px in -600.0f32..600.0,
    ) {
        let start = base();
        let end = start + Duration::days(length);
        let window = TimelineWindow::new(start, ViewMode::Week);
        let mut controller = DragController::new();
        controller
            .begin(
                BarTarget::Project(Uuid::new_v4()),
                DragKind::Move,
                300.0,
                (start, end),
                window.bar_span(start, end),
            )
            .unwrap();
        let days = drag::day_delta((300.0 + delta_px) - 300.0, cell);
        let commit = controller.finish(300.0 + delta_px, cell);
        prop_assert!(!controller.is_dragging());
        match commit {
            Some(commit) => {
                prop_assert_eq!(commit.start, start + Duration::days(days));
                prop_assert_eq!(commit.end - commit.start, end - start);
            }
            None => prop_assert_eq!(days, 0),
        }
    }

    #[test]
    fn resizes_never_invert(
        length in 1i64..30,
        days in -60i64..60,
        left in any::<bool>(),
    ) {
        let start = base();
        let end = start + Duration::days(length);
        let kind = if left { DragKind::ResizeLeft } else { DragKind::ResizeRight };
        if let Some((new_start, new_end)) = drag::resolve(kind, start, end, days) {
            prop_assert!(new_start < new_end);
        }
    }

    #[test]
    fn toggling_a_chip_twice_is_identity(
        initial in prop::collection::vec(chip(), 0..8),
        toggled in chip(),
    ) {
        let original = ChipSet::from_chips(initial);
        let mut chips = original.clone();
        chips.toggle(toggled.clone());
        prop_assert_ne!(chips.contains(&toggled), original.contains(&toggled));
        chips.toggle(toggled);
        prop_assert!(chips.same_chips(&original));
    }
}
