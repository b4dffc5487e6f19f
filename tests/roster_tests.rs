//! Integration tests for the RSVP roster

use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use rsvp_roster::{AttendanceStatus, ErrorKind, Roster, RosterError};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn setup_test_roster(capacity: usize) -> (Arc<Roster>, String) {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let temp_file = format!("target/test_roster_{}_{}.jsonl", std::process::id(), id);
    let _ = fs::remove_file(&temp_file);

    let roster = Arc::new(Roster::with_file_path(&temp_file, capacity).unwrap());
    (roster, temp_file)
}

fn cleanup(file_path: &str) {
    let _ = fs::remove_file(file_path);
}

fn fill(roster: &Roster, count: usize) -> Vec<u64> {
    (1..=count)
        .map(|i| roster.rsvp_in(&format!("Player {i}")).unwrap().participant.id)
        .collect()
}

fn waitlist_positions(roster: &Roster) -> Vec<(String, u32)> {
    roster
        .list_categorized()
        .waitlist
        .into_iter()
        .map(|p| (p.name, p.waitlist_position.unwrap()))
        .collect()
}

#[test]
fn test_scenario_a_capacity_then_waitlist() {
    let (roster, temp_file) = setup_test_roster(22);

    let outcomes: Vec<_> = (1..=23)
        .map(|i| roster.rsvp_in(&format!("Player {i}")).unwrap())
        .collect();

    for outcome in &outcomes[..22] {
        assert!(outcome.participant.is_confirmed());
    }
    assert_eq!(outcomes[21].message, "Confirmed IN! (22/22 spots filled)");

    let last = &outcomes[22];
    assert_eq!(last.participant.waitlist_position, Some(1));
    assert_eq!(last.message, "Added to waitlist at position 1");

    let listing = roster.list_categorized();
    assert_eq!(listing.total_confirmed, 22);
    assert_eq!(listing.total_waitlist, 1);
    assert_eq!(listing.spots_available, 0);

    cleanup(&temp_file);
}

#[test]
fn test_scenario_b_withdrawal_promotes() {
    let (roster, temp_file) = setup_test_roster(22);
    fill(&roster, 23);

    let outcome = roster.rsvp_out("Player 5").unwrap();
    assert_eq!(outcome.message, "Marked as OUT. Player 23 promoted from waitlist!");

    let promoted = roster.find_by_name("Player 23").unwrap();
    assert!(promoted.is_confirmed());
    assert_eq!(promoted.waitlist_position, None);

    let listing = roster.list_categorized();
    assert_eq!(listing.total_confirmed, 22);
    assert!(listing.waitlist.is_empty());
    assert_eq!(listing.out.len(), 1);

    cleanup(&temp_file);
}

#[test]
fn test_scenario_c_check_in_requires_payment() {
    let (roster, temp_file) = setup_test_roster(22);
    let p = roster.rsvp_in("Pat").unwrap().participant;

    let err = roster.check_in(p.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert!(!roster.get_participant(p.id).unwrap().checked_in);

    roster.set_payment(p.id, true).unwrap();
    let outcome = roster.check_in(p.id).unwrap();
    assert!(outcome.participant.checked_in);
    assert_eq!(outcome.message, "Successfully checked in Pat!");

    cleanup(&temp_file);
}

#[test]
fn test_scenario_d_waitlisted_cannot_check_in() {
    let (roster, temp_file) = setup_test_roster(1);
    fill(&roster, 1);
    let q = roster.rsvp_in("Quinn").unwrap().participant;
    assert_eq!(q.waitlist_position, Some(1));

    let err = roster.check_in(q.id).unwrap_err();
    assert!(matches!(err, RosterError::InvalidTransition(_)));

    roster.set_payment(q.id, true).unwrap();
    let err = roster.check_in(q.id).unwrap_err();
    assert!(matches!(err, RosterError::InvalidTransition(_)));

    cleanup(&temp_file);
}

#[test]
fn test_scenario_e_delete_confirmed_promotes_and_renumbers() {
    let (roster, temp_file) = setup_test_roster(2);
    let ids = fill(&roster, 2);
    roster.rsvp_in("First").unwrap();
    roster.rsvp_in("Second").unwrap();

    let deletion = roster.delete_participant(ids[0]).unwrap();
    assert_eq!(deletion.promoted.as_ref().unwrap().name, "First");
    assert_eq!(deletion.message, "Deleted Player 1. First promoted from waitlist!");

    assert!(roster.find_by_name("First").unwrap().is_confirmed());
    assert_eq!(waitlist_positions(&roster), vec![("Second".to_string(), 1)]);
    assert!(matches!(
        roster.get_participant(ids[0]),
        Err(RosterError::NotFound { .. })
    ));

    cleanup(&temp_file);
}

#[test]
fn test_promotion_renumbers_remaining_waitlist() {
    let (roster, temp_file) = setup_test_roster(3);
    fill(&roster, 3);
    for name in ["W1", "W2", "W3", "W4"] {
        roster.rsvp_in(name).unwrap();
    }

    roster.rsvp_out("Player 2").unwrap();
    roster.rsvp_out("W3").unwrap();

    assert_eq!(
        waitlist_positions(&roster),
        vec![("W2".to_string(), 1), ("W4".to_string(), 2)]
    );
    assert!(roster.find_by_name("W1").unwrap().is_confirmed());

    cleanup(&temp_file);
}

#[test]
fn test_case_insensitive_names_merge() {
    let (roster, temp_file) = setup_test_roster(22);

    let first = roster.rsvp_in("Alex").unwrap().participant;
    let second = roster.rsvp(" ALEX ", AttendanceStatus::In).unwrap();
    assert_eq!(second.participant.id, first.id);
    assert_eq!(second.message, "Already confirmed IN");

    let out = roster.rsvp_out("alex").unwrap();
    assert_eq!(out.participant.id, first.id);
    assert_eq!(roster.participants().len(), 1);

    cleanup(&temp_file);
}

#[test]
fn test_out_records_are_kept() {
    let (roster, temp_file) = setup_test_roster(22);

    let never_in = roster.rsvp_out("Morgan").unwrap().participant;
    assert_eq!(never_in.attendance_status, AttendanceStatus::Out);

    roster.rsvp_in("Sam").unwrap();
    roster.rsvp_out("Sam").unwrap();

    let listing = roster.list_categorized();
    let out: Vec<_> = listing.out.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(out, vec!["Morgan", "Sam"]);

    cleanup(&temp_file);
}

#[test]
fn test_rejoin_loses_previous_standing() {
    let (roster, temp_file) = setup_test_roster(1);
    let holder = roster.rsvp_in("Holder").unwrap().participant;
    roster.rsvp_in("Early").unwrap();
    roster.rsvp_in("Late").unwrap();

    roster.rsvp_out("Early").unwrap();
    let back = roster.rsvp_in("Early").unwrap();
    assert_eq!(back.participant.waitlist_position, Some(2));
    assert_eq!(
        waitlist_positions(&roster),
        vec![("Late".to_string(), 1), ("Early".to_string(), 2)]
    );

    roster.set_payment(holder.id, true).unwrap();
    roster.check_in(holder.id).unwrap();
    roster.rsvp_out("Holder").unwrap();
    let again = roster.rsvp_in("Holder").unwrap().participant;
    assert!(!again.paid);
    assert!(!again.checked_in);

    cleanup(&temp_file);
}

#[test]
fn test_check_in_idempotence() {
    let (roster, temp_file) = setup_test_roster(22);
    let p = roster.rsvp_in("Pat").unwrap().participant;
    roster.set_payment(p.id, true).unwrap();

    roster.check_in(p.id).unwrap();
    let before = roster.participants();
    let again = roster.check_in(p.id).unwrap();
    assert_eq!(again.message, "Player is already checked in");
    assert_eq!(roster.participants(), before);

    roster.undo_check_in(p.id).unwrap();
    let before = roster.participants();
    let again = roster.undo_check_in(p.id).unwrap();
    assert_eq!(again.message, "Player was not checked in");
    assert_eq!(roster.participants(), before);

    cleanup(&temp_file);
}

#[test]
fn test_undo_allowed_after_withdrawal_state() {
    let (roster, temp_file) = setup_test_roster(22);
    let p = roster.rsvp_out("Olly").unwrap().participant;

    // OUT participants can never be checked in, but undo still succeeds
    let outcome = roster.undo_check_in(p.id).unwrap();
    assert!(!outcome.participant.checked_in);
    let err = roster.check_in(p.id).unwrap_err();
    assert!(err.to_string().contains("current status: OUT"));

    cleanup(&temp_file);
}

#[test]
fn test_payment_rules() {
    let (roster, temp_file) = setup_test_roster(22);
    let p = roster.rsvp_in("Pat").unwrap().participant;
    roster.set_payment(p.id, true).unwrap();
    roster.check_in(p.id).unwrap();

    let outcome = roster.set_payment(p.id, false).unwrap();
    assert_eq!(outcome.message, "Pat marked as unpaid");
    assert!(!outcome.participant.checked_in);

    roster.rsvp_out("Pat").unwrap();
    let err = roster.set_payment(p.id, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);

    assert_eq!(roster.set_payment(404, true).unwrap_err().kind(), ErrorKind::NotFound);

    cleanup(&temp_file);
}

#[test]
fn test_stats_and_export() {
    let (roster, temp_file) = setup_test_roster(3);
    let ids = fill(&roster, 4);
    roster.rsvp_out("Leaver").unwrap();
    roster.set_payment(ids[0], true).unwrap();
    roster.set_payment(ids[1], true).unwrap();
    roster.check_in(ids[0]).unwrap();

    let stats = roster.stats();
    assert_eq!(stats.total_confirmed, 3);
    assert_eq!(stats.total_paid, 2);
    assert_eq!(stats.total_checked_in, 1);
    assert_eq!(stats.awaiting_payment, 1);
    assert_eq!(stats.awaiting_check_in, 1);

    let rows = roster.export_snapshot();
    let labels: Vec<_> = rows.iter().map(|r| r.display_status.as_str()).collect();
    assert_eq!(labels, vec!["CONFIRMED", "CONFIRMED", "CONFIRMED", "WAITLIST #1", "OUT"]);
    assert!(rows[0].paid && rows[0].checked_in);

    cleanup(&temp_file);
}

#[test]
fn test_reset_clears_everything() {
    let (roster, temp_file) = setup_test_roster(1);
    fill(&roster, 3);

    let reset = roster.reset_all().unwrap();
    assert_eq!(reset.removed, 3);
    assert!(roster.participants().is_empty());

    let fresh = roster.rsvp_in("Player 1").unwrap();
    assert!(fresh.participant.is_confirmed());

    cleanup(&temp_file);
}

#[test]
fn test_state_survives_reopen() {
    let (roster, temp_file) = setup_test_roster(2);
    let ids = fill(&roster, 3);
    roster.set_payment(ids[1], true).unwrap();
    roster.check_in(ids[1]).unwrap();
    roster.delete_participant(ids[0]).unwrap();
    drop(roster);

    let reopened = Roster::with_file_path(&temp_file, 2).unwrap();
    assert!(reopened.get_participant(ids[1]).unwrap().checked_in);
    assert!(reopened.get_participant(ids[2]).unwrap().is_confirmed());
    assert!(reopened.check_invariants().is_empty());

    // Ids are never reused, even for the deleted participant's slot
    let next = reopened.rsvp_in("Newcomer").unwrap().participant;
    assert_eq!(next.id, 4);

    cleanup(&temp_file);
}

#[test]
fn test_invariants_hold_over_mixed_sequence() {
    let roster = Roster::new(4);
    let names: Vec<String> = (0..12).map(|i| format!("P{i}")).collect();

    // Small deterministic LCG so the sequence is reproducible
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: u64| {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    for step in 0..600 {
        let name = &names[next(names.len() as u64) as usize];
        let id = next(14) + 1;
        let _ = match next(7) {
            0 | 1 => roster.rsvp_in(name).map(|_| ()),
            2 => roster.rsvp_out(name).map(|_| ()),
            3 => roster.set_payment(id, next(2) == 0).map(|_| ()),
            4 => roster.check_in(id).map(|_| ()),
            5 => roster.undo_check_in(id).map(|_| ()),
            _ => {
                if next(10) == 0 {
                    roster.delete_participant(id).map(|_| ())
                } else {
                    roster.promote_from_waitlist().map(|_| ())
                }
            }
        };

        let broken = roster.check_invariants();
        assert!(broken.is_empty(), "step {step}: {broken:?}");

        // A free slot never coexists with a waitlist
        let listing = roster.list_categorized();
        assert!(listing.spots_available == 0 || listing.waitlist.is_empty());
    }
}

#[test]
fn test_concurrent_rsvps_respect_capacity() {
    let roster = Arc::new(Roster::new(22));
    let mut handles = vec![];

    for t in 0..8 {
        let roster_clone = Arc::clone(&roster);
        handles.push(thread::spawn(move || {
            for i in 0..10 {
                roster_clone.rsvp_in(&format!("T{t}-{i}")).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let listing = roster.list_categorized();
    assert_eq!(listing.total_confirmed, 22);
    assert_eq!(listing.total_waitlist, 58);
    let positions: HashSet<u32> = listing
        .waitlist
        .iter()
        .filter_map(|p| p.waitlist_position)
        .collect();
    assert_eq!(positions, (1..=58).collect());
    assert!(roster.check_invariants().is_empty());
}

#[test]
fn test_concurrent_withdrawals_promote_in_order() {
    let (roster, temp_file) = setup_test_roster(10);
    fill(&roster, 20);
    let mut handles = vec![];

    for t in 0..5 {
        let roster_clone = Arc::clone(&roster);
        handles.push(thread::spawn(move || {
            roster_clone.rsvp_out(&format!("Player {}", t + 1)).unwrap();
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let listing = roster.list_categorized();
    assert_eq!(listing.total_confirmed, 10);
    let promoted: HashSet<String> = (11..=15).map(|i| format!("Player {i}")).collect();
    for name in &promoted {
        assert!(roster.find_by_name(name).unwrap().is_confirmed(), "{name}");
    }
    let remaining: Vec<_> = waitlist_positions(&roster);
    let expected: Vec<_> = (16..=20)
        .enumerate()
        .map(|(i, n)| (format!("Player {n}"), i as u32 + 1))
        .collect();
    assert_eq!(remaining, expected);

    cleanup(&temp_file);
}
