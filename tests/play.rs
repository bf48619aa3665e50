//! Playing levels through public API: movement rules, bounded undo,
//! level sets and session.

use sokomadlib::*;
use sokomadlib::config::GameConfig;
use Direction::*;

const LEVELS: &str = r#"; Sokomad test levels

#######
#-@$.-#
#######
; Corridor

#######
#-$$@.#
#######
; Stuck pair

#######
#@-$-##
#--.--#
#######
; Open floor
"#;

fn corridor() -> Level {
    Level::from_rows("corridor", 7, 3, &[
        "#######",
        "#-@$.-#",
        "#######"]).unwrap()
}

#[test]
fn test_corridor_push_completes() {
    let level = corridor();
    assert_eq!(1, level.packs().len());
    let mut state = LevelState::new(&level);
    assert!(!state.is_completed());
    assert_eq!(MoveOutcome::Pushed, state.make_move(Right));
    assert_eq!((1, 1), (state.steps(), state.pushes()));
    assert!(state.is_completed());
    assert_eq!("#######\n#--@*-#\n#######", state.to_string());
}

#[test]
fn test_blocked_moves_change_nothing() {
    let level = Level::from_rows("blocked", 7, 4, &[
        "#######",
        "#@-$###",
        "#-$$.-#",
        "#######"]).unwrap();
    let mut state = LevelState::new(&level);
    let initial = state.clone();
    // wall
    assert_eq!(MoveOutcome::Blocked, state.make_move(Up));
    assert_eq!(MoveOutcome::Blocked, state.make_move(Left));
    assert_eq!(initial, state);

    // pack with wall behind it
    assert_eq!(MoveOutcome::Stepped, state.make_move(Right));
    let before = state.clone();
    assert_eq!(MoveOutcome::Blocked, state.make_move(Right));
    assert_eq!(before, state);
    assert_eq!(0, state.pushes());

    // pack into pack
    let mut state = initial.clone();
    assert_eq!(MoveOutcome::Stepped, state.make_move(Down));
    let before = state.clone();
    assert_eq!(MoveOutcome::Blocked, state.make_move(Right));
    assert_eq!(before, state);
    assert_eq!(&[Position::new(3, 1), Position::new(2, 2), Position::new(3, 2)],
            state.packs());
}

#[test]
fn test_undo_restores_up_to_three_moves() {
    let level = Level::from_rows("undo", 8, 3, &[
        "########",
        "#@-$--.#",
        "########"]).unwrap();
    let mut state = LevelState::new(&level);
    let initial = state.clone();
    for _ in 0..3 {
        assert!(state.make_move(Right).is_move());
    }
    assert_eq!(Position::new(4, 1), state.player());
    assert_eq!(&[Position::new(5, 1)], state.packs());
    assert_eq!((3, 2), (state.steps(), state.pushes()));
    for _ in 0..3 {
        assert!(state.undo_move());
    }
    assert_eq!(initial, state);
    assert!(!state.undo_move());

    // fourth move evicts the first one
    for _ in 0..4 {
        assert!(state.make_move(Right).is_move());
    }
    assert_eq!(HISTORY_CAPACITY, state.history().len());
    for _ in 0..4 {
        state.undo_move();
    }
    assert_eq!(Position::new(2, 1), state.player());
    assert_eq!(&[Position::new(3, 1)], state.packs());
    assert_eq!((1, 0), (state.steps(), state.pushes()));
}

#[test]
fn test_undo_revokes_completion() {
    let level = corridor();
    let mut state = LevelState::new(&level);
    state.make_move(Right);
    assert!(state.is_completed());
    assert!(state.undo_move());
    assert!(!state.is_completed());
    assert_eq!(Field::Pack, state.field(Position::new(3, 1)));
}

#[test]
fn test_level_set_session() {
    let lset = LevelSet::from_str(LEVELS, 7, 3).unwrap();
    assert_eq!("Sokomad test levels", lset.name());
    assert_eq!(3, lset.levels().len());
    assert!(lset.has_errors());
    let levels = lset.playable_levels();
    assert_eq!(vec!["Corridor", "Stuck pair"],
            levels.iter().map(|l| l.name()).collect::<Vec<_>>());

    let mut session = Session::new(&levels, 0).unwrap();
    let outcomes = session.run_script("rl r >").unwrap();
    assert_eq!(vec![
        CommandOutcome::Moved(MoveOutcome::Pushed),
        CommandOutcome::Rejected,
        CommandOutcome::Rejected,
        CommandOutcome::Advanced(Advance::Level(1))], outcomes);
    assert_eq!("Stuck pair", session.state().level().name());
    assert_eq!(CommandOutcome::Moved(MoveOutcome::Blocked),
            session.handle(Command::Move(Left)));
    assert_eq!(CommandOutcome::Rejected, session.handle(Command::NextLevel));
}

#[test]
fn test_level_set_with_config_dimensions() {
    let config = GameConfig::from_str("[grid]\nwidth = 7\nheight = 4\n").unwrap();
    let lset = LevelSet::from_str(LEVELS, config.grid.width, config.grid.height).unwrap();
    let levels = lset.levels();
    assert_eq!(3, levels.len());
    // only third level has four rows
    assert!(levels[0].is_err());
    assert!(levels[1].is_err());
    let level = levels[2].as_ref().unwrap();
    assert_eq!("Open floor", level.name());
    assert!(level.check().is_ok());
}
