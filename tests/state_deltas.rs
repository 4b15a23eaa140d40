use std::time::{Duration, Instant};

use polo_terminal::config::SessionConfig;
use polo_terminal::heatmap::Zone;
use polo_terminal::roster::PlayerCounter;
use polo_terminal::session::Session;
use polo_terminal::side::Side;
use polo_terminal::state::{AppState, Delta, Modal, Pacer, Panel, ShotKind, apply_delta};

const SECOND: Duration = Duration::from_secs(1);

fn fresh_state() -> AppState {
    AppState::new(Session::default())
}

#[test]
fn ticks_advance_clock_and_possession() {
    let mut state = fresh_state();
    state.session.start_game();
    state.session.start_possession(Side::Away);
    apply_delta(&mut state, Delta::ClockTick);
    apply_delta(&mut state, Delta::ClockTick);
    apply_delta(&mut state, Delta::PossessionTick);

    assert_eq!(state.session.clock().elapsed(), 2);
    assert_eq!(state.session.team().possession_away, 1);
    assert!(state.logs.iter().any(|line| line == "[OK] Game started"));
}

#[test]
fn log_delta_lands_in_console_and_is_capped() {
    let mut state = fresh_state();
    for n in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("line {n}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.back().map(String::as_str), Some("line 249"));
}

#[test]
fn goal_flow_through_zone_picker_and_auto_switch() {
    let mut state = fresh_state();
    state.session.start_possession(Side::Home);
    state.roster_selected = 2;
    state.select_cursor_player();
    state.open_zone_picker(ShotKind::Goal);
    assert!(matches!(state.modal, Some(Modal::ZonePicker { player_id: 3, .. })));

    state.pick_zone(Zone::LeftWing);
    assert!(state.modal.is_none());
    assert!(state.session.selection().is_none());
    assert_eq!(state.session.roster(Side::Home).get(3).map(|p| p.goals), Some(1));
    assert!(state.logs.iter().any(|line| line.contains("GOAL from Left Wing")));

    let switch = state.session.take_scheduled()[0];
    apply_delta(&mut state, Delta::AutoSwitch(switch));
    assert!(state.session.possession().is_active(Side::Away));
    assert_eq!(state.view_side(), Side::Away);
}

#[test]
fn actions_without_selection_warn() {
    let mut state = fresh_state();
    state.open_zone_picker(ShotKind::Shot);
    state.turnover();
    assert!(state.modal.is_none());
    let warnings = state
        .logs
        .iter()
        .filter(|line| line.starts_with("[WARN]"))
        .count();
    assert_eq!(warnings, 2);
}

#[test]
fn plus_minus_follow_panel_focus() {
    let mut state = fresh_state();
    state.select_next();
    state.cycle_counter_next();
    state.adjust_selected(1);
    assert_eq!(
        state
            .session
            .roster(Side::Home)
            .get(2)
            .map(|p| p.get(PlayerCounter::ALL[1])),
        Some(1)
    );

    state.toggle_panel();
    assert_eq!(state.panel, Panel::Team);
    state.select_prev();
    state.adjust_selected(1);
    assert_eq!(state.session.team().six_on_seven, 1);
}

#[test]
fn roster_cursor_wraps() {
    let mut state = fresh_state();
    state.select_prev();
    assert_eq!(state.roster_selected, 6);
    state.select_next();
    assert_eq!(state.roster_selected, 0);
}

#[test]
fn play_picker_logs_chosen_play() {
    let mut state = fresh_state();
    state.open_play_picker();
    state.move_play_picker(true);
    state.move_play_picker(true);
    state.pick_play(false);
    let latest = state.session.plays().latest().expect("play logged");
    assert_eq!(latest.name, "Power Play");
    assert!(!latest.success);
}

#[test]
fn rename_modal_commits_trimmed_name() {
    let mut state = fresh_state();
    state.open_player_rename();
    if let Some(Modal::Rename { buffer, .. }) = &mut state.modal {
        buffer.clear();
    }
    for ch in " Jo".chars() {
        state.rename_input(ch);
    }
    state.rename_input('x');
    state.rename_backspace();
    state.commit_rename();
    assert_eq!(
        state.session.roster(Side::Home).get(1).map(|p| p.name.as_str()),
        Some("Jo")
    );

    state.session.start_game();
    state.open_player_rename();
    assert!(state.modal.is_none());
}

#[test]
fn pacer_emits_ticks_and_due_switches() {
    let start = Instant::now();
    let mut state = fresh_state();
    let mut pacer = Pacer::new(SECOND, Duration::from_millis(500));

    state.session.start_game();
    state.session.start_possession(Side::Home);
    assert!(pacer.poll(start, &state.session).is_empty());
    let deltas = pacer.poll(start + SECOND * 2, &state.session);
    assert_eq!(
        deltas,
        vec![
            Delta::ClockTick,
            Delta::ClockTick,
            Delta::PossessionTick,
            Delta::PossessionTick,
        ]
    );
    for delta in deltas {
        apply_delta(&mut state, delta);
    }

    state
        .session
        .on_turnover(Side::Home, 1)
        .expect("player 1 exists");
    let turned = start + SECOND * 2;
    pacer.collect(turned, &mut state.session);
    assert_eq!(pacer.pending_switches(), 1);

    let deltas = pacer.poll(turned + Duration::from_millis(600), &state.session);
    assert_eq!(deltas.len(), 1);
    assert!(matches!(deltas[0], Delta::AutoSwitch(switch) if switch.to == Side::Away));
    assert_eq!(pacer.pending_switches(), 0);
}

#[test]
fn pacer_holds_possession_while_clock_gated() {
    let start = Instant::now();
    let mut state = AppState::new(Session::new(SessionConfig {
        possession_follows_clock: true,
        ..SessionConfig::default()
    }));
    let mut pacer = Pacer::new(SECOND, Duration::from_millis(500));
    state.session.start_possession(Side::Away);
    pacer.poll(start, &state.session);
    assert!(pacer.poll(start + SECOND * 3, &state.session).is_empty());
}

#[test]
fn steal_by_browsed_defender_flips_possession() {
    let mut state = fresh_state();
    state.session.start_possession(Side::Home);
    assert_eq!(state.view_side(), Side::Home);

    state.toggle_roster_view();
    assert_eq!(state.view_side(), Side::Away);
    state.roster_selected = 3;
    state.select_cursor_player();
    state.steal();

    assert!(state.session.possession().active_side().is_none());
    assert_eq!(state.session.roster(Side::Away).get(104).map(|p| p.steals), Some(1));
    assert!(state.roster_view.is_none());

    let switch = state.session.take_scheduled()[0];
    assert_eq!(switch.to, Side::Away);
    apply_delta(&mut state, Delta::AutoSwitch(switch));
    assert!(state.session.possession().is_active(Side::Away));
    assert_eq!(state.view_side(), Side::Away);
}

#[test]
fn steal_by_player_with_the_ball_is_refused() {
    let mut state = fresh_state();
    state.session.start_possession(Side::Home);
    state.select_cursor_player();
    state.steal();

    assert!(state.session.take_scheduled().is_empty());
    assert!(state.session.possession().is_active(Side::Home));
    assert!(state.session.selection().is_some());
    assert!(
        state
            .logs
            .back()
            .is_some_and(|line| line.starts_with("[WARN]") && line.contains("steal"))
    );
}

#[test]
fn roster_view_toggles_back_to_the_side_with_the_ball() {
    let mut state = fresh_state();
    state.session.start_possession(Side::Away);
    state.roster_selected = 6;
    state.toggle_roster_view();
    assert_eq!(state.roster_view, Some(Side::Home));
    state.toggle_roster_view();
    assert_eq!(state.roster_view, None);
    assert_eq!(state.view_side(), Side::Away);
    assert_eq!(state.roster_selected, 6);
}

#[test]
fn undo_at_the_boundary_leaves_console_alone() {
    let mut state = fresh_state();
    let before = state.logs.clone();
    state.undo();
    state.redo();
    assert_eq!(state.logs, before);
}

#[test]
fn pacer_reports_wait_until_next_switch() {
    let start = Instant::now();
    let mut state = fresh_state();
    let mut pacer = Pacer::new(SECOND, Duration::from_millis(500));
    assert_eq!(pacer.next_switch_in(start), None);

    state.session.start_possession(Side::Home);
    state.session.on_turnover(Side::Home, 2).expect("player 2 exists");
    pacer.collect(start, &mut state.session);
    assert_eq!(
        pacer.next_switch_in(start + Duration::from_millis(200)),
        Some(Duration::from_millis(300))
    );
    assert_eq!(
        pacer.next_switch_in(start + SECOND),
        Some(Duration::ZERO)
    );
}
