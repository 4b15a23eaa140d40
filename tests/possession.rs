use polo_terminal::config::SessionConfig;
use polo_terminal::error::Rejection;
use polo_terminal::heatmap::Zone;
use polo_terminal::notice::Notice;
use polo_terminal::possession::{PossessionEnd, PossessionState, SwitchPolicy};
use polo_terminal::roster::PlayerCounter;
use polo_terminal::session::Session;
use polo_terminal::side::Side;

fn ticks(session: &mut Session, n: u32) {
    for _ in 0..n {
        session.possession_tick();
    }
}

fn cancel_on_change() -> Session {
    Session::new(SessionConfig {
        switch_policy: SwitchPolicy::CancelOnChange,
        ..SessionConfig::default()
    })
}

#[test]
fn only_one_side_accrues_at_a_time() {
    let mut session = Session::default();
    session.start_possession(Side::Home);
    ticks(&mut session, 3);
    session.start_possession(Side::Away);
    ticks(&mut session, 2);

    assert_eq!(session.team().possession_home, 3);
    assert_eq!(session.team().possession_away, 2);
    assert_eq!(session.possession().state(), PossessionState::Active(Side::Away));

    let timeline = session.possession().timeline();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].side, Side::Home);
    assert_eq!(timeline[0].duration, 3);
    assert_eq!(timeline[0].end, PossessionEnd::Manual);
}

#[test]
fn idle_possession_does_not_accrue() {
    let mut session = Session::default();
    assert!(!session.possession_tick());
    session.toggle_possession(Side::Home);
    ticks(&mut session, 2);
    session.toggle_possession(Side::Home);
    ticks(&mut session, 5);
    assert_eq!(session.team().possession_home, 2);
    assert_eq!(session.possession().state(), PossessionState::Idle);
}

#[test]
fn possession_can_follow_the_game_clock() {
    let mut session = Session::new(SessionConfig {
        possession_follows_clock: true,
        ..SessionConfig::default()
    });
    session.start_possession(Side::Away);
    ticks(&mut session, 2);
    assert_eq!(session.team().possession_away, 0);

    session.start_game();
    ticks(&mut session, 2);
    session.pause_game();
    ticks(&mut session, 2);
    assert_eq!(session.team().possession_away, 2);
}

#[test]
fn goal_updates_scorer_heatmap_and_hands_ball_over() {
    let mut session = Session::default();
    session
        .adjust_player_stat(Side::Home, 3, PlayerCounter::Goals, 2)
        .expect("player 3 exists");
    session
        .adjust_player_stat(Side::Home, 3, PlayerCounter::Shots, 5)
        .expect("player 3 exists");

    session.start_possession(Side::Away);
    ticks(&mut session, 3);
    session.start_possession(Side::Home);
    ticks(&mut session, 4);
    let away_before = session.team().possession_away;

    session
        .on_goal_scored(Side::Home, 3, Zone::RightWing)
        .expect("player 3 exists");

    let scorer = session.roster(Side::Home).get(3).expect("player 3");
    assert_eq!(scorer.goals, 3);
    assert_eq!(scorer.shots, 6);
    assert_eq!(session.heatmap().grid(Side::Home)[0][1], 1);
    assert_eq!(session.possession().state(), PossessionState::Idle);
    let last = session.possession().timeline().last().expect("home possession");
    assert_eq!(last.end, PossessionEnd::Goal);
    assert_eq!(last.duration, 4);

    let scheduled = session.take_scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].to, Side::Away);

    session.drain_notices();
    assert!(session.apply_auto_switch(scheduled[0]));
    assert_eq!(session.possession().state(), PossessionState::Active(Side::Away));
    assert_eq!(session.possession().start_offset(), away_before);
    assert_eq!(
        session.drain_notices(),
        vec![Notice::PossessionStarted {
            team: "Opponent".to_string(),
            restart: true,
        }]
    );
}

#[test]
fn turnover_goes_to_opponent_and_steal_to_the_stealer() {
    let mut session = Session::default();
    session.start_possession(Side::Home);
    session.on_turnover(Side::Home, 2).expect("player 2 exists");
    let turnover = session.take_scheduled();
    assert_eq!(turnover[0].to, Side::Away);
    assert_eq!(turnover[0].cause, PossessionEnd::Turnover);
    assert_eq!(session.roster(Side::Home).get(2).map(|p| p.turnovers), Some(1));

    session.apply_auto_switch(turnover[0]);
    session.on_steal(Side::Home, 5).expect("player 5 exists");
    let steal = session.take_scheduled();
    assert_eq!(steal[0].to, Side::Home);
    assert_eq!(session.roster(Side::Home).get(5).map(|p| p.steals), Some(1));
    assert!(session.apply_auto_switch(steal[0]));
    assert!(session.possession().is_active(Side::Home));
}

#[test]
fn last_write_wins_lets_a_stale_switch_land() {
    let mut session = Session::default();
    session.start_possession(Side::Home);
    session.on_turnover(Side::Home, 1).expect("player 1 exists");
    let switch = session.take_scheduled()[0];

    // Scorekeeper corrects by hand before the delay elapses.
    session.start_possession(Side::Home);
    assert!(session.apply_auto_switch(switch));
    assert!(session.possession().is_active(Side::Away));
}

#[test]
fn cancel_on_change_drops_a_superseded_switch() {
    let mut session = cancel_on_change();
    session.start_possession(Side::Home);
    session.on_turnover(Side::Home, 1).expect("player 1 exists");
    let switch = session.take_scheduled()[0];

    session.start_possession(Side::Home);
    assert!(!session.apply_auto_switch(switch));
    assert!(session.possession().is_active(Side::Home));
}

#[test]
fn cancel_on_change_keeps_only_the_latest_of_two_switches() {
    let mut session = cancel_on_change();
    session.start_possession(Side::Home);
    session.on_turnover(Side::Home, 1).expect("player 1 exists");
    session.on_steal(Side::Home, 2).expect("player 2 exists");
    let switches = session.take_scheduled();
    assert_eq!(switches.len(), 2);

    assert!(!session.apply_auto_switch(switches[0]));
    assert!(session.apply_auto_switch(switches[1]));
    assert!(session.possession().is_active(Side::Home));
}

#[test]
fn reset_invalidates_pending_switches() {
    let mut session = Session::default();
    session.start_possession(Side::Away);
    session
        .on_goal_scored(Side::Away, 104, Zone::PointLeft)
        .expect("away player 104 exists");
    let switch = session.take_scheduled()[0];

    session.reset();
    assert!(!session.apply_auto_switch(switch));
    assert_eq!(session.possession().state(), PossessionState::Idle);
    assert!(session.possession().timeline().is_empty());
}

#[test]
fn switch_to_the_running_side_changes_nothing() {
    let mut session = Session::default();
    session.start_possession(Side::Home);
    session.on_steal(Side::Away, 103).expect("away player 103 exists");
    session.start_possession(Side::Away);
    let history = session.history().len();
    let switch = session.take_scheduled()[0];
    assert!(!session.apply_auto_switch(switch));
    assert_eq!(session.history().len(), history);
}

#[test]
fn side_in_possession_cannot_steal() {
    let mut session = Session::default();
    session.start_possession(Side::Home);
    let history = session.history().len();
    session.drain_notices();

    assert_eq!(
        session.on_steal(Side::Home, 4),
        Err(Rejection::StealByPossessor { side: Side::Home })
    );
    assert!(session.take_scheduled().is_empty());
    assert!(session.possession().is_active(Side::Home));
    assert_eq!(session.roster(Side::Home).get(4).map(|p| p.steals), Some(0));
    assert_eq!(session.history().len(), history);
    assert!(matches!(session.drain_notices().as_slice(), [Notice::Rejected(_)]));
}
