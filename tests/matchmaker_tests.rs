use rand::rngs::SmallRng;
use rand::SeedableRng;
use seastrike::protocol::ServerMessage;
use seastrike::{GridSpec, Matchmaker, MatchmakerError, Phase};

fn matchmaker() -> Matchmaker {
    Matchmaker::new(GridSpec::new(8.0, 8), SmallRng::seed_from_u64(1))
}

#[test]
fn the_first_client_waits_and_the_second_is_paired() {
    let mut mm = matchmaker();

    let (room_a, events) = mm.join(1).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].msg, ServerMessage::WaitingForOpponent);
    assert_eq!(mm.room_count(), 1);

    let (room_b, events) = mm.join(2).unwrap();
    assert_eq!(room_a, room_b);
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|e| matches!(e.msg, ServerMessage::GameStart { .. })));
    assert_eq!(mm.room_count(), 1);
}

#[test]
fn a_third_client_opens_a_new_room() {
    let mut mm = matchmaker();
    let (first, _) = mm.join(1).unwrap();
    mm.join(2).unwrap();

    let (second, events) = mm.join(3).unwrap();
    assert_ne!(first, second);
    assert_eq!(events[0].msg, ServerMessage::WaitingForOpponent);
    assert_eq!(mm.room_count(), 2);
}

#[test]
fn joining_twice_is_refused() {
    let mut mm = matchmaker();
    mm.join(1).unwrap();
    assert_eq!(mm.join(1).unwrap_err(), MatchmakerError::AlreadyInRoom);
    assert_eq!(mm.room_count(), 1);
}

#[test]
fn room_lookup_requires_a_prior_join() {
    let mut mm = matchmaker();
    assert!(matches!(
        mm.room_for(9).unwrap_err(),
        MatchmakerError::NotInRoom
    ));

    mm.join(9).unwrap();
    let room = mm.room_for(9).unwrap();
    assert!(room.lock().unwrap().members().contains(&9));
}

#[test]
fn removing_a_client_tears_the_room_down() {
    let mut mm = matchmaker();
    mm.join(1).unwrap();
    mm.join(2).unwrap();

    let events = mm.remove_client(1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].to, 2);
    assert_eq!(events[0].msg, ServerMessage::PlayerDisconnected(1));
    assert_eq!(mm.room_count(), 0);

    // Both seats were unregistered, so either client may queue again.
    mm.join(1).unwrap();
    mm.join(2).unwrap();
    assert_eq!(mm.room_count(), 1);
}

#[test]
fn removing_an_unknown_client_is_a_noop() {
    let mut mm = matchmaker();
    mm.join(1).unwrap();
    assert!(mm.remove_client(42).is_empty());
    assert_eq!(mm.room_count(), 1);
}

#[test]
fn remove_room_frees_its_members() {
    let mut mm = matchmaker();
    let (id, _) = mm.join(1).unwrap();
    mm.join(2).unwrap();
    assert_eq!(mm.room_for(1).unwrap().lock().unwrap().phase(), Phase::Placing);

    mm.remove_room(id);
    assert_eq!(mm.room_count(), 0);
    assert!(mm.room_for(1).is_err());
    assert!(mm.room_for(2).is_err());
}
