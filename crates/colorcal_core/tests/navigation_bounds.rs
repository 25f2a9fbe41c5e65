use colorcal_core::{
    CalendarDate, CalendarError, NavigationBounds, NavigationState, YearMonth,
};

fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

fn bounded_state(current: CalendarDate) -> NavigationState {
    let bounds = NavigationBounds::new(
        Some(YearMonth::new(2024, 2).unwrap()),
        Some(YearMonth::new(2024, 8).unwrap()),
    )
    .unwrap();
    NavigationState::new(current, date(2024, 5, 1), bounds).unwrap()
}

#[test]
fn navigation_inside_bounds_always_succeeds() {
    let mut state = bounded_state(date(2024, 2, 15));
    for expected in 3..=8 {
        assert!(state.go_to_next_month());
        assert_eq!(state.current().month(), expected);
    }
    assert!(!state.go_to_next_month());
    assert_eq!(state.current().month(), 8);

    for expected in (2..=7).rev() {
        assert!(state.go_to_prev_month());
        assert_eq!(state.current().month(), expected);
    }
    assert!(!state.go_to_prev_month());
    assert_eq!(state.current(), date(2024, 2, 15));
}

#[test]
fn direct_jumps_outside_bounds_are_no_ops() {
    let mut state = bounded_state(date(2024, 5, 10));
    assert!(!state.go_to_month(1).unwrap());
    assert!(!state.go_to_month(9).unwrap());
    assert!(!state.go_to_year(2023, None).unwrap());
    assert!(!state.go_to_year(2025, Some(3)).unwrap());
    assert!(!state.go_to_prev_year());
    assert!(!state.go_to_next_year());
    assert_eq!(state.current(), date(2024, 5, 10));
}

#[test]
fn flags_at_boundary_months() {
    let state = bounded_state(date(2024, 2, 1));
    let flags = state.flags();
    assert!(!flags.can_go_prev_month);
    assert!(flags.can_go_next_month);

    let state = bounded_state(date(2024, 8, 30));
    let flags = state.flags();
    assert!(flags.can_go_prev_month);
    assert!(!flags.can_go_next_month);
}

#[test]
fn day_component_of_bounds_is_ignored() {
    let bounds =
        NavigationBounds::from_dates(Some(date(2024, 2, 31)), Some(date(2024, 8, 1))).unwrap();
    assert!(bounds.contains(YearMonth::new(2024, 2).unwrap()));
    assert!(bounds.contains(YearMonth::new(2024, 8).unwrap()));
    NavigationState::new(date(2024, 2, 1), date(2024, 2, 1), bounds)
        .expect("first day of start month is inside bounds");
}

#[test]
fn picker_years_outside_bounds_are_disabled() {
    let state = bounded_state(date(2024, 5, 10));
    let window = state.picker_window();
    for option in &window.options {
        assert_eq!(option.is_disabled, option.year != 2024, "{}", option.year);
    }
}

#[test]
fn set_current_rejects_out_of_bounds_dates() {
    let mut state = bounded_state(date(2024, 5, 10));
    assert_eq!(
        state.set_current(date(2024, 11, 1)).unwrap_err(),
        CalendarError::DateOutOfBounds(date(2024, 11, 1))
    );
    state.set_current(date(2024, 8, 1)).unwrap();
    assert_eq!(state.current(), date(2024, 8, 1));
}
